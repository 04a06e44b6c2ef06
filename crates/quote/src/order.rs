//! Hand-off of a priced request to order persistence and file storage.
//!
//! Both collaborators are traits; this crate ships only a filesystem blob
//! store. Order records, their ids and their lifecycle belong to the caller.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use log::info;
use thiserror::Error;

use crate::{quote, QuoteError, QuoteRequest, Quotation};

#[derive(Debug, Error)]
pub enum OrderError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("Invalid email address format")]
    InvalidEmail,

    #[error("Invalid phone number format")]
    InvalidPhone,

    #[error(transparent)]
    Quote(#[from] QuoteError),

    #[error("failed to store {file}: {source}")]
    Storage {
        file: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to save order: {0}")]
    Persist(String),
}

/// Contact details of the customer placing an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerInfo {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

impl CustomerInfo {
    /// Trims every field and lowercases the email.
    pub fn new(full_name: &str, email: &str, phone: &str, address: &str) -> Result<Self, OrderError> {
        let required = |value: &str, field| {
            let value = value.trim();
            if value.is_empty() {
                Err(OrderError::MissingField(field))
            } else {
                Ok(value.to_string())
            }
        };
        let full_name = required(full_name, "Full name")?;
        let address = required(address, "Address")?;
        let phone = required(phone, "Phone number")?;
        let email = required(email, "Email address")?.to_lowercase();

        if !is_valid_email(&email) {
            return Err(OrderError::InvalidEmail);
        }
        if !is_valid_phone(&phone) {
            return Err(OrderError::InvalidPhone);
        }
        Ok(Self {
            full_name,
            email,
            phone,
            address,
        })
    }
}

// local@domain.tld, no whitespace, exactly one '@'.
fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

// Optional leading '+', then digits with ( ) - . separators, ending in a digit.
fn is_valid_phone(phone: &str) -> bool {
    let compact: String = phone.chars().filter(|c| !c.is_whitespace()).collect();
    let rest = compact.strip_prefix('+').unwrap_or(&compact);
    let digits = rest.chars().filter(char::is_ascii_digit).count();
    rest.chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '(' | ')' | '-' | '.'))
        && rest.ends_with(|c: char| c.is_ascii_digit())
        && (1..=17).contains(&digits)
}

/// A mesh file persisted for an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    /// Name as uploaded.
    pub file_name: String,
    /// Where the blob store put it.
    pub locator: String,
    pub size: usize,
}

/// Everything handed to the order store for one order.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub order_id: String,
    pub customer: CustomerInfo,
    pub quotation: Quotation,
    pub infill_percent: u8,
    pub wall_count: u32,
    pub files: Vec<StoredFile>,
}

pub trait BlobStore {
    /// Stores raw mesh bytes under `order_id` and returns a locator for them.
    fn put(&mut self, order_id: &str, file_name: &str, bytes: &[u8]) -> Result<String, OrderError>;
}

pub trait OrderStore {
    /// Reserves an id for an order that is about to be created.
    fn allocate_id(&mut self) -> String;

    /// Persists the order and returns its id.
    fn create_order(&mut self, order: Order) -> Result<String, OrderError>;
}

/// Stores blobs as `<root>/orders/<order_id>/<file_name>`.
///
/// A name already taken within the order is stored as `<n>-<file_name>`
/// with the smallest free `n`, so same-named uploads never overwrite each
/// other.
pub struct LocalBlobStore {
    root: PathBuf,
}

impl LocalBlobStore {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
}

impl BlobStore for LocalBlobStore {
    fn put(&mut self, order_id: &str, file_name: &str, bytes: &[u8]) -> Result<String, OrderError> {
        let storage_error = |source: std::io::Error| OrderError::Storage {
            file: file_name.to_string(),
            source,
        };
        // Only the final path component is used so an upload name cannot escape the order directory.
        let name = Path::new(file_name)
            .file_name()
            .ok_or_else(|| storage_error(ErrorKind::InvalidInput.into()))?
            .to_string_lossy();
        let dir = self.root.join("orders").join(order_id);
        fs::create_dir_all(&dir).map_err(storage_error)?;

        let mut suffix = 0u32;
        loop {
            let path = if suffix == 0 {
                dir.join(&*name)
            } else {
                dir.join(format!("{suffix}-{name}"))
            };
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(mut file) => {
                    file.write_all(bytes).map_err(storage_error)?;
                    return Ok(path.display().to_string());
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => suffix += 1,
                Err(e) => return Err(storage_error(e)),
            }
        }
    }
}

/// Prices `request`, stores its files and records the order.
///
/// Nothing is persisted when pricing fails. A storage failure leaves
/// already written blobs behind but creates no order.
pub fn submit_order<O: OrderStore, B: BlobStore>(
    request: &QuoteRequest,
    customer: CustomerInfo,
    orders: &mut O,
    blobs: &mut B,
) -> Result<String, OrderError> {
    let quotation = quote(request)?;
    let order_id = orders.allocate_id();

    let files = request
        .uploads
        .iter()
        .map(|upload| {
            let locator = blobs.put(&order_id, &upload.name, &upload.bytes)?;
            Ok(StoredFile {
                file_name: upload.name.clone(),
                locator,
                size: upload.bytes.len(),
            })
        })
        .collect::<Result<Vec<_>, OrderError>>()?;

    let order_id = orders.create_order(Order {
        order_id,
        customer,
        quotation,
        infill_percent: request.settings.infill_percent(),
        wall_count: request.settings.wall_count(),
        files,
    })?;
    info!("created order {order_id}");
    Ok(order_id)
}

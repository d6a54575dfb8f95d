use crate::domain::employee::{Employee, EmployeeId, NewEmployee};
use crate::domain::ports::{EmployeeStore, PageRequest};
use crate::error::{PayrollError, Result};
use async_trait::async_trait;
use rocksdb::{ColumnFamily, ColumnFamilyDescriptor, DB, IteratorMode, Options, WriteBatch};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Column Family for storing employee records.
pub const CF_EMPLOYEES: &str = "employees";
/// Column Family mapping each email to the id that owns it.
pub const CF_EMAILS: &str = "emails";
/// Column Family mapping each payroll id to the id that owns it.
pub const CF_PAYROLL_IDS: &str = "payroll_ids";
/// Column Family for store bookkeeping (the id sequence).
pub const CF_META: &str = "meta";

const LAST_ID_KEY: &[u8] = b"last_id";

/// A persistent store implementation using RocksDB.
///
/// Records are stored as JSON under their big-endian id, so iteration order is id
/// order. Two index Column Families enforce uniqueness of emails and payroll ids.
///
/// Every write goes through a single async mutex so that the uniqueness checks,
/// the id sequence and the batched write are observed atomically. This struct is
/// thread-safe (`Clone` shares the underlying `Arc<DB>`).
#[derive(Clone)]
pub struct RocksDBStore {
    db: Arc<DB>,
    write_lock: Arc<Mutex<()>>,
}

impl RocksDBStore {
    /// Opens or creates a RocksDB instance at the specified path.
    ///
    /// Ensures that all required column families exist.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let descriptors = [CF_EMPLOYEES, CF_EMAILS, CF_PAYROLL_IDS, CF_META]
            .into_iter()
            .map(|name| ColumnFamilyDescriptor::new(name, Options::default()))
            .collect::<Vec<_>>();

        let db = DB::open_cf_descriptors(&opts, path, descriptors)?;

        Ok(Self {
            db: Arc::new(db),
            write_lock: Arc::new(Mutex::new(())),
        })
    }

    fn cf(&self, name: &str) -> Result<&ColumnFamily> {
        self.db.cf_handle(name).ok_or_else(|| {
            PayrollError::InternalError(Box::new(std::io::Error::other(format!(
                "{} column family not found",
                name
            ))))
        })
    }

    fn read_employee(&self, id: EmployeeId) -> Result<Option<Employee>> {
        let cf = self.cf(CF_EMPLOYEES)?;
        match self.db.get_cf(cf, id.to_be_bytes())? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    fn owner_of(&self, index: &str, value: &str) -> Result<Option<EmployeeId>> {
        let cf = self.cf(index)?;
        self.db
            .get_cf(cf, value.as_bytes())?
            .map(|bytes| decode_id(&bytes))
            .transpose()
    }

    fn check_unique(&self, own_id: Option<EmployeeId>, email: &str, payroll_id: &str) -> Result<()> {
        if let Some(owner) = self.owner_of(CF_EMAILS, email)?
            && Some(owner) != own_id
        {
            return Err(PayrollError::ConstraintViolation(format!(
                "email '{}' is already in use",
                email
            )));
        }
        if let Some(owner) = self.owner_of(CF_PAYROLL_IDS, payroll_id)?
            && Some(owner) != own_id
        {
            return Err(PayrollError::ConstraintViolation(format!(
                "payroll id '{}' is already in use",
                payroll_id
            )));
        }
        Ok(())
    }

    fn next_id(&self) -> Result<EmployeeId> {
        let cf = self.cf(CF_META)?;
        let last = match self.db.get_cf(cf, LAST_ID_KEY)? {
            Some(bytes) => decode_id(&bytes)?,
            None => 0,
        };
        Ok(last + 1)
    }

    /// Stages the record and its index entries, dropping index entries of the
    /// previous version of the record.
    fn stage_write(&self, batch: &mut WriteBatch, previous: Option<&Employee>, employee: &Employee) -> Result<()> {
        let key = employee.id().to_be_bytes();

        if let Some(previous) = previous {
            if previous.email() != employee.email() {
                batch.delete_cf(self.cf(CF_EMAILS)?, previous.email().as_bytes());
            }
            if previous.payroll_id() != employee.payroll_id() {
                batch.delete_cf(self.cf(CF_PAYROLL_IDS)?, previous.payroll_id().as_bytes());
            }
        }

        batch.put_cf(self.cf(CF_EMAILS)?, employee.email().as_bytes(), key);
        batch.put_cf(self.cf(CF_PAYROLL_IDS)?, employee.payroll_id().as_bytes(), key);
        batch.put_cf(self.cf(CF_EMPLOYEES)?, key, serde_json::to_vec(employee)?);
        Ok(())
    }
}

fn decode_id(bytes: &[u8]) -> Result<EmployeeId> {
    let raw: [u8; 8] = bytes.try_into().map_err(|_| {
        PayrollError::InternalError(Box::new(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("Invalid id encoding of {} bytes", bytes.len()),
        )))
    })?;
    Ok(EmployeeId::from_be_bytes(raw))
}

#[async_trait]
impl EmployeeStore for RocksDBStore {
    async fn insert(&self, employee: NewEmployee) -> Result<Employee> {
        let _guard = self.write_lock.lock().await;
        self.check_unique(None, &employee.details.email, &employee.details.payroll_id)?;

        let id = self.next_id()?;
        let employee = employee.into_employee(id);

        let mut batch = WriteBatch::default();
        self.stage_write(&mut batch, None, &employee)?;
        batch.put_cf(self.cf(CF_META)?, LAST_ID_KEY, id.to_be_bytes());
        self.db.write(batch)?;

        Ok(employee)
    }

    async fn get(&self, id: EmployeeId) -> Result<Option<Employee>> {
        self.read_employee(id)
    }

    async fn save(&self, employee: Employee) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        self.check_unique(Some(employee.id()), employee.email(), employee.payroll_id())?;

        let previous = self.read_employee(employee.id())?;
        let mut batch = WriteBatch::default();
        self.stage_write(&mut batch, previous.as_ref(), &employee)?;
        self.db.write(batch)?;

        Ok(())
    }

    async fn delete(&self, id: EmployeeId) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let Some(previous) = self.read_employee(id)? else {
            return Ok(());
        };

        let mut batch = WriteBatch::default();
        batch.delete_cf(self.cf(CF_EMAILS)?, previous.email().as_bytes());
        batch.delete_cf(self.cf(CF_PAYROLL_IDS)?, previous.payroll_id().as_bytes());
        batch.delete_cf(self.cf(CF_EMPLOYEES)?, id.to_be_bytes());
        self.db.write(batch)?;

        Ok(())
    }

    async fn list(&self, page: PageRequest) -> Result<Vec<Employee>> {
        let cf = self.cf(CF_EMPLOYEES)?;

        let mut employees = Vec::new();
        let iter = self
            .db
            .iterator_cf(cf, IteratorMode::Start)
            .skip(page.offset())
            .take(page.size);

        for item in iter {
            let (_key, value) = item?;
            employees.push(serde_json::from_slice(&value)?);
        }

        Ok(employees)
    }
}

//! NVS (Non-Volatile Storage) adapter.
//!
//! Implements [`StoragePort`] for the two lockout fields. The storage
//! layout is part of the device's firmware contract: one namespace, two
//! fixed keys, no versioning or migration.
//!
//! | Key        | Width | Meaning                     |
//! |------------|-------|-----------------------------|
//! | `lockwait` | u16   | remaining lockdown seconds  |
//! | `badtries` | u8    | consecutive wrong attempts  |
//!
//! The two fields are written independently; each `nvs_commit` is
//! atomic per key, but there is no joint atomicity across them — an
//! accepted property of the layout, not a bug to fix here.
//!
//! Per the port contract, reads and writes are infallible from the
//! domain's perspective: a missing key reads as 0 (first boot) and
//! backend failures are logged and absorbed. Only flash initialisation
//! in [`NvsStore::new`] can fail.

use log::info;
#[cfg(target_os = "espidf")]
use log::warn;

use crate::app::ports::StoragePort;
use crate::error::Result;
#[cfg(target_os = "espidf")]
use crate::error::{Error, StorageError};

#[cfg(not(target_os = "espidf"))]
use std::cell::Cell;

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
const NAMESPACE: &str = "codelock";
#[cfg(target_os = "espidf")]
const KEY_LOCKDOWN: &[u8] = b"lockwait\0";
#[cfg(target_os = "espidf")]
const KEY_WRONG_TRIES: &[u8] = b"badtries\0";

pub struct NvsStore {
    #[cfg(not(target_os = "espidf"))]
    lockdown: Cell<u16>,
    #[cfg(not(target_os = "espidf"))]
    wrong_tries: Cell<u8>,
}

impl NvsStore {
    /// Create the store and initialise NVS flash.
    ///
    /// Returns `Err(Error::Init)` if flash initialisation fails
    /// unrecoverably. On first boot or after a partition-version
    /// mismatch the NVS partition is erased and re-initialised
    /// automatically.
    pub fn new() -> Result<Self> {
        #[cfg(target_os = "espidf")]
        {
            // SAFETY: nvs_flash_init / nvs_flash_erase are called from
            // the single main-task context before any concurrent NVS
            // access.
            let ret = unsafe { nvs_flash_init() };
            if ret == ESP_ERR_NVS_NO_FREE_PAGES || ret == ESP_ERR_NVS_NEW_VERSION_FOUND {
                warn!("NVS: erasing and re-initialising flash partition");
                if unsafe { nvs_flash_erase() } != ESP_OK {
                    return Err(Error::Init("nvs_flash_erase failed"));
                }
                if unsafe { nvs_flash_init() } != ESP_OK {
                    return Err(Error::Init("nvs_flash_init failed after erase"));
                }
            } else if ret != ESP_OK {
                return Err(Error::Init("nvs_flash_init failed"));
            }
            info!("NvsStore: ESP-IDF NVS initialised");
        }

        #[cfg(not(target_os = "espidf"))]
        info!("NvsStore: simulation backend");

        Ok(Self {
            #[cfg(not(target_os = "espidf"))]
            lockdown: Cell::new(0),
            #[cfg(not(target_os = "espidf"))]
            wrong_tries: Cell::new(0),
        })
    }

    /// Open the namespace, run a closure with the handle, then close.
    #[cfg(target_os = "espidf")]
    fn with_nvs_handle<F, T>(write: bool, f: F) -> core::result::Result<T, i32>
    where
        F: FnOnce(nvs_handle_t) -> core::result::Result<T, i32>,
    {
        let mut ns_buf = [0u8; 16];
        let ns_bytes = NAMESPACE.as_bytes();
        ns_buf[..ns_bytes.len()].copy_from_slice(ns_bytes);

        let mut handle: nvs_handle_t = 0;
        let mode = if write {
            nvs_open_mode_t_NVS_READWRITE
        } else {
            nvs_open_mode_t_NVS_READONLY
        };

        let ret = unsafe { nvs_open(ns_buf.as_ptr() as *const _, mode, &mut handle) };
        if ret != ESP_OK {
            return Err(ret);
        }

        let result = f(handle);
        unsafe {
            nvs_close(handle);
        }
        result
    }

    #[cfg(target_os = "espidf")]
    fn raw_read_u16(key: &[u8]) -> core::result::Result<u16, StorageError> {
        let result = Self::with_nvs_handle(false, |handle| {
            let mut value: u16 = 0;
            let ret = unsafe { nvs_get_u16(handle, key.as_ptr() as *const _, &mut value) };
            if ret != ESP_OK {
                return Err(ret);
            }
            Ok(value)
        });
        result.map_err(|e| match e {
            e if e == ESP_ERR_NVS_NOT_FOUND => StorageError::NotFound,
            e => StorageError::Backend(e),
        })
    }

    #[cfg(target_os = "espidf")]
    fn raw_read_u8(key: &[u8]) -> core::result::Result<u8, StorageError> {
        let result = Self::with_nvs_handle(false, |handle| {
            let mut value: u8 = 0;
            let ret = unsafe { nvs_get_u8(handle, key.as_ptr() as *const _, &mut value) };
            if ret != ESP_OK {
                return Err(ret);
            }
            Ok(value)
        });
        result.map_err(|e| match e {
            e if e == ESP_ERR_NVS_NOT_FOUND => StorageError::NotFound,
            e => StorageError::Backend(e),
        })
    }

    #[cfg(target_os = "espidf")]
    fn raw_write_u16(key: &[u8], value: u16) -> core::result::Result<(), StorageError> {
        Self::with_nvs_handle(true, |handle| {
            let ret = unsafe { nvs_set_u16(handle, key.as_ptr() as *const _, value) };
            if ret != ESP_OK {
                return Err(ret);
            }
            let ret = unsafe { nvs_commit(handle) };
            if ret != ESP_OK {
                return Err(ret);
            }
            Ok(())
        })
        .map_err(StorageError::Backend)
    }

    #[cfg(target_os = "espidf")]
    fn raw_write_u8(key: &[u8], value: u8) -> core::result::Result<(), StorageError> {
        Self::with_nvs_handle(true, |handle| {
            let ret = unsafe { nvs_set_u8(handle, key.as_ptr() as *const _, value) };
            if ret != ESP_OK {
                return Err(ret);
            }
            let ret = unsafe { nvs_commit(handle) };
            if ret != ESP_OK {
                return Err(ret);
            }
            Ok(())
        })
        .map_err(StorageError::Backend)
    }
}

impl StoragePort for NvsStore {
    fn read_lockdown_remaining(&self) -> u16 {
        #[cfg(target_os = "espidf")]
        {
            match Self::raw_read_u16(KEY_LOCKDOWN) {
                Ok(v) => v,
                Err(StorageError::NotFound) => 0,
                Err(e) => {
                    warn!("NvsStore: lockwait read failed ({e}), treating as 0");
                    0
                }
            }
        }

        #[cfg(not(target_os = "espidf"))]
        self.lockdown.get()
    }

    fn write_lockdown_remaining(&mut self, secs: u16) {
        #[cfg(target_os = "espidf")]
        if let Err(e) = Self::raw_write_u16(KEY_LOCKDOWN, secs) {
            warn!("NvsStore: lockwait write failed ({e})");
        }

        #[cfg(not(target_os = "espidf"))]
        self.lockdown.set(secs);
    }

    fn read_wrong_tries(&self) -> u8 {
        #[cfg(target_os = "espidf")]
        {
            match Self::raw_read_u8(KEY_WRONG_TRIES) {
                Ok(v) => v,
                Err(StorageError::NotFound) => 0,
                Err(e) => {
                    warn!("NvsStore: badtries read failed ({e}), treating as 0");
                    0
                }
            }
        }

        #[cfg(not(target_os = "espidf"))]
        self.wrong_tries.get()
    }

    fn write_wrong_tries(&mut self, count: u8) {
        #[cfg(target_os = "espidf")]
        if let Err(e) = Self::raw_write_u8(KEY_WRONG_TRIES, count) {
            warn!("NvsStore: badtries write failed ({e})");
        }

        #[cfg(not(target_os = "espidf"))]
        self.wrong_tries.set(count);
    }
}

#[cfg(all(test, not(target_os = "espidf")))]
mod tests {
    use super::*;

    #[test]
    fn fields_default_to_zero() {
        let store = NvsStore::new().unwrap();
        assert_eq!(store.read_lockdown_remaining(), 0);
        assert_eq!(store.read_wrong_tries(), 0);
    }

    #[test]
    fn fields_are_independent() {
        let mut store = NvsStore::new().unwrap();
        store.write_lockdown_remaining(300);
        store.write_wrong_tries(3);
        assert_eq!(store.read_lockdown_remaining(), 300);
        assert_eq!(store.read_wrong_tries(), 3);

        store.write_wrong_tries(0);
        assert_eq!(store.read_lockdown_remaining(), 300);
    }
}

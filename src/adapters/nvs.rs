//! NVS (Non-Volatile Storage) adapter.
//!
//! Implements both [`ConfigPort`] and [`EepromPort`] for the Rollcall kiosk.
//!
//! - Config: a postcard blob under `rollcall::kcfg`, range-checked
//!   before every save.
//! - Roster: the byte-addressed roster image is emulated as one NVS blob
//!   under `rollcall::roster`.  A write patches the cached image and
//!   rewrites the whole blob; bytes never written read back as `0xFF`,
//!   like erased EEPROM.
//!
//! NVS commits are atomic per blob, which is stronger than the
//! roster image needs; the store still treats persistence as
//! overwrite-in-place.

use crate::app::ports::{ConfigError, ConfigPort, EepromPort, StorageError};
use crate::config::KioskConfig;
use crate::error;
use crate::roster::layout::IMAGE_SIZE;
use log::info;
#[cfg(target_os = "espidf")]
use log::warn;

#[cfg(not(target_os = "espidf"))]
use std::collections::HashMap;

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

const NAMESPACE: &str = "rollcall";
const CONFIG_KEY: &str = "kcfg";
const ROSTER_KEY: &str = "roster";

/// Largest config blob accepted on load.
const MAX_CONFIG_BLOB: usize = 256;

/// Value of never-written image bytes.
const ERASED: u8 = 0xFF;

pub struct NvsAdapter {
    #[cfg(not(target_os = "espidf"))]
    store: std::cell::RefCell<HashMap<String, Vec<u8>>>,
}

impl NvsAdapter {
    /// Create a new NvsAdapter and initialise NVS flash.
    ///
    /// Returns [`Error::Init`](crate::error::Error::Init) if flash initialisation fails
    /// unrecoverably. On first boot or after a version mismatch the NVS
    /// partition is erased and re-initialised automatically, which also
    /// discards any stored roster.
    pub fn new() -> error::Result<Self> {
        #[cfg(target_os = "espidf")]
        {
            // SAFETY: nvs_flash_init / nvs_flash_erase are called from the
            // single main-task context before any concurrent NVS access.
            let ret = unsafe { nvs_flash_init() };
            if ret == ESP_ERR_NVS_NO_FREE_PAGES || ret == ESP_ERR_NVS_NEW_VERSION_FOUND {
                warn!("NVS: erasing and re-initialising flash partition");
                if unsafe { nvs_flash_erase() } != ESP_OK {
                    return Err(error::Error::Init("nvs_flash_erase failed"));
                }
                if unsafe { nvs_flash_init() } != ESP_OK {
                    return Err(error::Error::Init("nvs_flash_init failed after erase"));
                }
            } else if ret != ESP_OK {
                return Err(error::Error::Init("nvs_flash_init failed"));
            }
            info!("NvsAdapter: ESP-IDF NVS initialised");
        }

        #[cfg(not(target_os = "espidf"))]
        info!("NvsAdapter: simulation backend");

        Ok(Self {
            #[cfg(not(target_os = "espidf"))]
            store: std::cell::RefCell::new(HashMap::new()),
        })
    }

    // ── Blob primitives ───────────────────────────────────────

    #[cfg(not(target_os = "espidf"))]
    fn composite_key(key: &str) -> String {
        format!("{}::{}", NAMESPACE, key)
    }

    /// Read a whole blob into `buf`, returning its length.
    #[cfg(not(target_os = "espidf"))]
    fn get_blob(&self, key: &str, buf: &mut [u8]) -> Result<usize, StorageError> {
        match self.store.borrow().get(&Self::composite_key(key)) {
            Some(data) if data.len() <= buf.len() => {
                buf[..data.len()].copy_from_slice(data);
                Ok(data.len())
            }
            Some(_) => Err(StorageError::OutOfBounds),
            None => Err(StorageError::NotFound),
        }
    }

    #[cfg(not(target_os = "espidf"))]
    fn set_blob(&self, key: &str, data: &[u8]) -> Result<(), StorageError> {
        self.store
            .borrow_mut()
            .insert(Self::composite_key(key), data.to_vec());
        Ok(())
    }

    /// Open the namespace, execute a closure with the handle, then close.
    #[cfg(target_os = "espidf")]
    fn with_nvs_handle<F, T>(write: bool, f: F) -> Result<T, i32>
    where
        F: FnOnce(nvs_handle_t) -> Result<T, i32>,
    {
        let mut ns_buf = [0u8; 16];
        let ns_bytes = NAMESPACE.as_bytes();
        let len = ns_bytes.len().min(15);
        ns_buf[..len].copy_from_slice(&ns_bytes[..len]);

        let mut handle: nvs_handle_t = 0;
        let mode = if write {
            nvs_open_mode_t_NVS_READWRITE
        } else {
            nvs_open_mode_t_NVS_READONLY
        };

        // SAFETY: ns_buf is NUL-terminated and outlives the call.
        let ret = unsafe { nvs_open(ns_buf.as_ptr() as *const _, mode, &mut handle) };
        if ret != ESP_OK {
            return Err(ret);
        }

        let result = f(handle);
        // SAFETY: handle was opened above and is closed exactly once.
        unsafe {
            nvs_close(handle);
        }
        result
    }

    #[cfg(target_os = "espidf")]
    fn key_buf(key: &str) -> [u8; 16] {
        let mut key_buf = [0u8; 16];
        let kb = key.as_bytes();
        let kl = kb.len().min(15);
        key_buf[..kl].copy_from_slice(&kb[..kl]);
        key_buf
    }

    #[cfg(target_os = "espidf")]
    fn get_blob(&self, key: &str, buf: &mut [u8]) -> Result<usize, StorageError> {
        let key_buf = Self::key_buf(key);
        let result = Self::with_nvs_handle(false, |handle| {
            let mut size = buf.len();
            // SAFETY: key_buf is NUL-terminated; size bounds the write into buf.
            let ret = unsafe {
                nvs_get_blob(
                    handle,
                    key_buf.as_ptr() as *const _,
                    buf.as_mut_ptr() as *mut _,
                    &mut size,
                )
            };
            if ret != ESP_OK {
                return Err(ret);
            }
            Ok(size)
        });
        match result {
            Ok(size) => Ok(size),
            Err(e) if e == ESP_ERR_NVS_NOT_FOUND => Err(StorageError::NotFound),
            Err(e) if e == ESP_ERR_NVS_INVALID_LENGTH => Err(StorageError::OutOfBounds),
            Err(e) => {
                warn!("NvsAdapter: read of '{}' failed ({})", key, e);
                Err(StorageError::IoError)
            }
        }
    }

    #[cfg(target_os = "espidf")]
    fn set_blob(&self, key: &str, data: &[u8]) -> Result<(), StorageError> {
        let key_buf = Self::key_buf(key);
        let result = Self::with_nvs_handle(true, |handle| {
            // SAFETY: key_buf is NUL-terminated; data outlives the call.
            let ret = unsafe {
                nvs_set_blob(
                    handle,
                    key_buf.as_ptr() as *const _,
                    data.as_ptr() as *const _,
                    data.len(),
                )
            };
            if ret != ESP_OK {
                return Err(ret);
            }
            // SAFETY: handle is open for writing.
            let ret = unsafe { nvs_commit(handle) };
            if ret != ESP_OK {
                return Err(ret);
            }
            Ok(())
        });
        result.map_err(|e| {
            warn!("NvsAdapter: write of '{}' failed ({})", key, e);
            StorageError::IoError
        })
    }

    // ── Roster image ──────────────────────────────────────────

    /// The full roster image, or `NotFound` if it was never written.
    fn read_image(&self) -> Result<[u8; IMAGE_SIZE], StorageError> {
        let mut image = [ERASED; IMAGE_SIZE];
        self.get_blob(ROSTER_KEY, &mut image)?;
        Ok(image)
    }
}

/// Range-check every config field.
pub fn validate_config(cfg: &KioskConfig) -> Result<(), ConfigError> {
    if !(1..=600).contains(&cfg.entry_timeout_secs) {
        return Err(ConfigError::ValidationFailed(
            "entry_timeout_secs must be 1–600",
        ));
    }
    let dwells = [
        cfg.notice_dwell_ms,
        cfg.remove_dwell_ms,
        cfg.list_dwell_ms,
        cfg.empty_dwell_ms,
        cfg.transmit_dwell_ms,
    ];
    if dwells.iter().any(|&ms| ms > 10_000) {
        return Err(ConfigError::ValidationFailed(
            "dwell periods must be 0–10000 ms",
        ));
    }
    if !(100..=10_000).contains(&cfg.temp_refresh_ms) {
        return Err(ConfigError::ValidationFailed(
            "temp_refresh_ms must be 100–10000",
        ));
    }
    if !(100..=10_000).contains(&cfg.traffic_refresh_ms) {
        return Err(ConfigError::ValidationFailed(
            "traffic_refresh_ms must be 100–10000",
        ));
    }
    if !(1..=400).contains(&cfg.traffic_count_threshold_cm) {
        return Err(ConfigError::ValidationFailed(
            "traffic_count_threshold_cm must be 1–400",
        ));
    }
    if ![1200, 2400, 4800, 9600, 19_200, 38_400, 57_600, 115_200].contains(&cfg.serial_baud) {
        return Err(ConfigError::ValidationFailed(
            "serial_baud must be a standard rate 1200–115200",
        ));
    }
    Ok(())
}

impl ConfigPort for NvsAdapter {
    fn load(&self) -> Result<KioskConfig, ConfigError> {
        let mut buf = [0u8; MAX_CONFIG_BLOB];
        match self.get_blob(CONFIG_KEY, &mut buf) {
            Ok(len) => {
                let cfg: KioskConfig =
                    postcard::from_bytes(&buf[..len]).map_err(|_| ConfigError::Corrupted)?;
                validate_config(&cfg)?;
                info!("NvsAdapter: loaded config ({} bytes)", len);
                Ok(cfg)
            }
            Err(StorageError::NotFound) => {
                info!("NvsAdapter: no stored config, using defaults");
                Ok(KioskConfig::default())
            }
            Err(StorageError::OutOfBounds) => Err(ConfigError::Corrupted),
            Err(StorageError::IoError) => Err(ConfigError::IoError),
        }
    }

    fn save(&self, config: &KioskConfig) -> Result<(), ConfigError> {
        validate_config(config)?;
        let bytes = postcard::to_allocvec(config).map_err(|_| ConfigError::IoError)?;
        self.set_blob(CONFIG_KEY, &bytes)
            .map_err(|_| ConfigError::IoError)?;
        info!("NvsAdapter: config saved ({} bytes)", bytes.len());
        Ok(())
    }
}

impl EepromPort for NvsAdapter {
    fn read_bytes(&self, offset: usize, buf: &mut [u8]) -> Result<(), StorageError> {
        let end = offset
            .checked_add(buf.len())
            .filter(|&end| end <= IMAGE_SIZE)
            .ok_or(StorageError::OutOfBounds)?;
        let image = self.read_image()?;
        buf.copy_from_slice(&image[offset..end]);
        Ok(())
    }

    fn write_bytes(&mut self, offset: usize, data: &[u8]) -> Result<(), StorageError> {
        let end = offset
            .checked_add(data.len())
            .filter(|&end| end <= IMAGE_SIZE)
            .ok_or(StorageError::OutOfBounds)?;
        let mut image = match self.read_image() {
            Ok(image) => image,
            Err(StorageError::NotFound) => [ERASED; IMAGE_SIZE],
            Err(e) => return Err(e),
        };
        image[offset..end].copy_from_slice(data);
        self.set_blob(ROSTER_KEY, &image)
    }
}

//! Environment variable management for testing
//!
//! Tests in one binary share a single process environment, so every guard
//! holds a process-wide lock for its lifetime. Only one guard may be alive per
//! test.

use std::cell::RefCell;
use std::env;
use std::ffi::OsString;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use tempfile::TempDir;

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// A test environment that points the XDG directories at a per-test temporary
/// directory and records every variable it touches so it can be restored.
pub struct EnvTestGuard {
  /// The temporary directory backing the XDG directories
  pub temp_dir: TempDir,
  /// Original values of every variable changed through this guard
  saved: RefCell<Vec<(String, Option<OsString>)>>,
  _lock: MutexGuard<'static, ()>,
}

impl Default for EnvTestGuard {
  fn default() -> Self {
    Self::new()
  }
}

impl EnvTestGuard {
  /// XDG environment variable names
  pub const XDG_CONFIG_HOME: &'static str = "XDG_CONFIG_HOME";
  pub const XDG_DATA_HOME: &'static str = "XDG_DATA_HOME";
  pub const XDG_CACHE_HOME: &'static str = "XDG_CACHE_HOME";

  /// Create a new test environment with overridden XDG directories
  pub fn new() -> Self {
    let lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");

    let guard = Self {
      temp_dir,
      saved: RefCell::new(Vec::new()),
      _lock: lock,
    };

    let temp_path = guard.temp_dir.path().to_path_buf();
    for (var, sub) in [
      (Self::XDG_CONFIG_HOME, "config"),
      (Self::XDG_DATA_HOME, "data"),
      (Self::XDG_CACHE_HOME, "cache"),
    ] {
      let dir = temp_path.join(sub);
      std::fs::create_dir_all(&dir).expect("Failed to create XDG directory");
      guard.set(var, &dir.to_string_lossy());
    }

    guard
  }

  /// Set an environment variable until the guard is dropped
  pub fn set(&self, key: &str, value: &str) {
    self.remember(key);
    unsafe {
      env::set_var(key, value);
    }
  }

  /// Get the path to the XDG config directory
  pub fn config_dir(&self) -> PathBuf {
    self.temp_dir.path().join("config")
  }

  fn remember(&self, key: &str) {
    let mut saved = self.saved.borrow_mut();
    if !saved.iter().any(|(name, _)| name == key) {
      saved.push((key.to_string(), env::var_os(key)));
    }
  }
}

impl Drop for EnvTestGuard {
  fn drop(&mut self) {
    for (key, original) in self.saved.borrow_mut().drain(..).rev() {
      match original {
        Some(val) => unsafe {
          env::set_var(&key, val);
        },
        None => unsafe {
          env::remove_var(&key);
        },
      }
    }
  }
}

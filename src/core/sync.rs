//! Synchronization utilities for robust lock handling
//!
//! Converts lock poisoning into domain errors so callers can propagate a
//! poisoned registry or bootstrap guard instead of panicking.

use std::sync::{LockResult, RwLockReadGuard, RwLockWriteGuard};

/// Handle poisoned mutex cases with consistent error handling
///
/// A mutex becomes poisoned when a thread panics while holding it. The
/// loader treats that as a fatal loader error rather than unwinding again,
/// so the poison result is mapped through the provided error constructor.
///
/// # Examples
/// ```
/// use std::sync::Mutex;
/// use autoload::core::sync::handle_mutex_poison;
/// use autoload::loader::api::LoaderError;
///
/// let mutex = Mutex::new(0u32);
/// let guard = handle_mutex_poison(
///     mutex.lock(),
///     |message| LoaderError::Generic { message }
/// ).unwrap();
/// assert_eq!(*guard, 0);
/// ```
pub fn handle_mutex_poison<T, E>(
    result: LockResult<T>,
    error_constructor: impl FnOnce(String) -> E,
) -> Result<T, E> {
    result.map_err(|poison_err| {
        error_constructor(format!(
            "Internal synchronisation error (mutex poisoned). A panic occurred while a lock was held. PoisonError: {:?}",
            poison_err
        ))
    })
}

/// Handle poisoned RwLock read operations with consistent error handling
///
/// An RwLock becomes poisoned for readers when a writer panics while
/// holding the lock.
pub fn handle_rwlock_read<T, E>(
    result: LockResult<RwLockReadGuard<T>>,
    error_constructor: impl FnOnce(String) -> E,
) -> Result<RwLockReadGuard<T>, E> {
    result.map_err(|poison_err| {
        error_constructor(format!(
            "Internal synchronisation error (RwLock read poisoned). A panic occurred while the write lock was held. PoisonError: {:?}",
            poison_err
        ))
    })
}

/// Handle poisoned RwLock write operations with consistent error handling
pub fn handle_rwlock_write<T, E>(
    result: LockResult<RwLockWriteGuard<T>>,
    error_constructor: impl FnOnce(String) -> E,
) -> Result<RwLockWriteGuard<T>, E> {
    result.map_err(|poison_err| {
        error_constructor(format!(
            "Internal synchronisation error (RwLock write poisoned). A panic occurred while the lock was held. PoisonError: {:?}",
            poison_err
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex, RwLock};
    use std::thread;

    #[derive(Debug, PartialEq)]
    struct TestError {
        message: String,
    }

    #[test]
    fn test_handle_mutex_poison_success() {
        let mutex = Mutex::new(7);
        let result = handle_mutex_poison(mutex.lock(), |msg| TestError { message: msg });

        assert!(result.is_ok());
        assert_eq!(*result.unwrap(), 7);
    }

    #[test]
    fn test_handle_mutex_poison_with_poisoned_mutex() {
        let mutex = Arc::new(Mutex::new(7));
        let mutex_clone = Arc::clone(&mutex);

        // Poison the mutex by panicking while holding the lock
        let _ = thread::spawn(move || {
            let _guard = mutex_clone.lock().unwrap();
            panic!("Intentional panic to poison mutex");
        })
        .join();

        let result = handle_mutex_poison(mutex.lock(), |msg| TestError { message: msg });

        assert!(result.is_err());
        let error = result.unwrap_err();
        assert!(error.message.contains("mutex poisoned"));
    }

    #[test]
    fn test_handle_rwlock_read_success() {
        let rwlock = RwLock::new(7);
        let result = handle_rwlock_read(rwlock.read(), |msg| TestError { message: msg });

        assert!(result.is_ok());
        assert_eq!(*result.unwrap(), 7);
    }

    #[test]
    fn test_handle_rwlock_write_success() {
        let rwlock = RwLock::new(7);
        let result = handle_rwlock_write(rwlock.write(), |msg| TestError { message: msg });

        assert!(result.is_ok());
        *result.unwrap() = 11;
        assert_eq!(*rwlock.read().unwrap(), 11);
    }
}

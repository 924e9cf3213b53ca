use maushold_core::{SessionError, SessionStorage};
use web_sys::Storage;

/// `localStorage`-backed session store.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalSessionStorage;

fn backing_store() -> Result<Storage, SessionError> {
    crate::dom::local_storage()
        .ok_or_else(|| SessionError::Storage(String::from("localStorage unavailable")))
}

fn storage_error(err: &wasm_bindgen::JsValue) -> SessionError {
    SessionError::Storage(crate::dom::js_error_message(err))
}

impl SessionStorage for LocalSessionStorage {
    fn read(&self, key: &str) -> Result<Option<String>, SessionError> {
        backing_store()?
            .get_item(key)
            .map_err(|err| storage_error(&err))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), SessionError> {
        backing_store()?
            .set_item(key, value)
            .map_err(|err| storage_error(&err))
    }

    fn remove(&self, key: &str) -> Result<(), SessionError> {
        backing_store()?
            .remove_item(key)
            .map_err(|err| storage_error(&err))
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use maushold_core::restore_session;

    #[test]
    fn missing_browser_storage_is_a_storage_error() {
        let err = LocalSessionStorage.read("maushold.session").unwrap_err();
        assert!(matches!(err, SessionError::Storage(_)));
        assert!(restore_session(&LocalSessionStorage).is_none());
    }
}

//! Reading user-picked image files into data URLs.

#[cfg(test)]
#[path = "upload_test.rs"]
mod upload_test;

/// Upload failure shown in the status bar.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum UploadError {
    #[error("no file selected")]
    NoFile,
    #[error("unsupported file type {0:?}; pick an image")]
    Unsupported(String),
    #[error("could not read the file: {0}")]
    Read(String),
}

/// Whether a MIME type can be decoded by an `<img>`.
pub fn is_supported_image_type(mime: &str) -> bool {
    mime.trim().to_ascii_lowercase().starts_with("image/")
}

/// Check the file's MIME type before reading it.
///
/// # Errors
///
/// Returns [`UploadError::Unsupported`] for non-image types.
pub fn check_image_type(mime: &str) -> Result<(), UploadError> {
    if is_supported_image_type(mime) {
        Ok(())
    } else {
        Err(UploadError::Unsupported(mime.to_owned()))
    }
}

/// First file selected in `<input type="file">`.
///
/// # Errors
///
/// Returns [`UploadError::NoFile`] when the selection is empty.
#[cfg(feature = "csr")]
pub fn selected_file(input: &web_sys::HtmlInputElement) -> Result<web_sys::File, UploadError> {
    input.files().and_then(|files| files.get(0)).ok_or(UploadError::NoFile)
}

/// Read `file` as a `data:` URL with `FileReader`.
///
/// # Errors
///
/// Returns [`UploadError`] for non-image files and for read failures.
#[cfg(feature = "csr")]
pub async fn read_as_data_url(file: web_sys::File) -> Result<String, UploadError> {
    use std::cell::RefCell;
    use std::rc::Rc;

    use futures::channel::oneshot;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::closure::Closure;

    check_image_type(&file.type_())?;

    let reader = web_sys::FileReader::new().map_err(|e| UploadError::Read(format!("{e:?}")))?;
    let (tx, rx) = oneshot::channel::<Result<(), String>>();
    let tx = Rc::new(RefCell::new(Some(tx)));

    let tx_load = Rc::clone(&tx);
    let on_load = Closure::once(move || {
        if let Some(tx) = tx_load.borrow_mut().take() {
            if tx.send(Ok(())).is_err() {
                log::debug!("upload receiver dropped");
            }
        }
    });
    let tx_error = Rc::clone(&tx);
    let on_error = Closure::once(move || {
        if let Some(tx) = tx_error.borrow_mut().take() {
            if tx.send(Err("reader error".to_owned())).is_err() {
                log::debug!("upload receiver dropped");
            }
        }
    });
    reader.set_onload(Some(on_load.as_ref().unchecked_ref()));
    reader.set_onerror(Some(on_error.as_ref().unchecked_ref()));
    reader.read_as_data_url(&file).map_err(|e| UploadError::Read(format!("{e:?}")))?;

    let outcome = rx.await.map_err(|_| UploadError::Read("read was abandoned".to_owned()))?;
    reader.set_onload(None);
    reader.set_onerror(None);
    outcome.map_err(UploadError::Read)?;

    reader
        .result()
        .map_err(|e| UploadError::Read(format!("{e:?}")))?
        .as_string()
        .ok_or_else(|| UploadError::Read("result is not a string".to_owned()))
}

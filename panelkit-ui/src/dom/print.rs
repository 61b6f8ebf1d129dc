//! Print View
//!
//! Serialises an element and opens the print document in a new tab.

use js_sys::Array;
use wasm_bindgen::prelude::*;
use web_sys::{Blob, BlobPropertyBag, Url};

use panelkit::{ElementSource, PrintSurface, ShellError, ShellResult};

use super::{by_id, window};

/// Reads markup from the live document
pub struct DomElementSource;

impl ElementSource for DomElementSource {
    fn outer_html(&self, id: &str) -> Option<String> {
        by_id(id).map(|element| element.outer_html())
    }
}

/// Opens the document as a blob URL in a new window
pub struct BlobWindowSurface;

fn unavailable(err: JsValue) -> ShellError {
    ShellError::SurfaceUnavailable(format!("{:?}", err))
}

impl PrintSurface for BlobWindowSurface {
    fn open(&mut self, document: &str) -> ShellResult<()> {
        let window =
            window().ok_or_else(|| ShellError::SurfaceUnavailable("no window".to_string()))?;

        let options = BlobPropertyBag::new();
        options.set_type("text/html");
        let parts = Array::of1(&JsValue::from_str(document));
        let blob = Blob::new_with_str_sequence_and_options(&parts, &options).map_err(unavailable)?;
        let url = Url::create_object_url_with_blob(&blob).map_err(unavailable)?;

        match window.open_with_url_and_target(&url, "_blank") {
            Ok(Some(_)) => Ok(()),
            Ok(None) => {
                let _ = Url::revoke_object_url(&url);
                Err(ShellError::SurfaceUnavailable(
                    "print window blocked by the browser".to_string(),
                ))
            }
            Err(e) => {
                let _ = Url::revoke_object_url(&url);
                Err(unavailable(e))
            }
        }
    }
}

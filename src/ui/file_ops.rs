//! File operations for exporting and importing blueprints.
//!
//! This module handles all file I/O: native file dialogs on desktop and
//! browser downloads / file pickers on the web. The async parts report back
//! through the channel in [`FileState`](super::state::FileState); results are
//! applied on the UI thread in arrival order.

use super::state::{BlueprintApp, FileOperationResult, PendingFileOperation};
use crate::constants::{DEFAULT_EXPORT_FILE_NAME, LOAD_FAILED_MESSAGE};
use eframe::egui;

impl BlueprintApp {
    /// Applies finished file operations and starts any newly requested one.
    ///
    /// # Arguments
    ///
    /// * `ctx` - The egui context for requesting repaints
    pub fn handle_pending_operations(&mut self, ctx: &egui::Context) {
        self.drain_file_results();

        match self.file.pending_operation.take() {
            Some(PendingFileOperation::Export) => self.start_export(ctx),
            Some(PendingFileOperation::Import) => self.start_import(ctx),
            None => {}
        }
    }

    /// Processes every result currently waiting in the channel.
    pub fn drain_file_results(&mut self) {
        let results: Vec<FileOperationResult> = match &self.file.file_operation_receiver {
            Some(receiver) => receiver.try_iter().collect(),
            None => return,
        };
        for result in results {
            self.apply_file_result(result);
        }
    }

    /// Applies a single file operation result.
    ///
    /// A loaded file replaces the whole blueprint. If it cannot be parsed the
    /// current blueprint is kept and the user is notified.
    pub fn apply_file_result(&mut self, result: FileOperationResult) {
        match result {
            FileOperationResult::SaveCompleted(name) => {
                log::info!("blueprint saved to {name}");
                self.file.last_file_name = Some(name);
            }
            FileOperationResult::SaveFailed(error) => {
                log::error!("saving blueprint failed: {error}");
            }
            FileOperationResult::LoadCompleted(name, content) => {
                match self.blueprint.replace_from_json(&content) {
                    Ok(()) => {
                        log::info!(
                            "loaded {name}: {} nodes, {} edges",
                            self.blueprint.nodes.len(),
                            self.blueprint.edges.len()
                        );
                        self.interaction.reset();
                        self.gestures = Default::default();
                        self.file.last_file_name = Some(name);
                    }
                    Err(err) => {
                        log::warn!("rejected {name}: {err}");
                        self.notification = Some(LOAD_FAILED_MESSAGE.to_string());
                    }
                }
            }
            FileOperationResult::LoadFailed(error) => {
                log::warn!("reading blueprint file failed: {error}");
                self.notification = Some(LOAD_FAILED_MESSAGE.to_string());
            }
        }
    }

    fn start_export(&mut self, ctx: &egui::Context) {
        let json = match self.blueprint.to_json() {
            Ok(json) => json,
            Err(err) => {
                log::error!("failed to serialize blueprint: {err}");
                return;
            }
        };
        let sender = self.file.file_operation_sender.clone();

        #[cfg(target_arch = "wasm32")]
        {
            let result = match Self::trigger_download(DEFAULT_EXPORT_FILE_NAME, &json) {
                Ok(()) => FileOperationResult::SaveCompleted(DEFAULT_EXPORT_FILE_NAME.to_string()),
                Err(e) => FileOperationResult::SaveFailed(e),
            };
            if let Some(tx) = sender {
                let _ = tx.send(result);
            }
            ctx.request_repaint();
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let ctx = ctx.clone();
            tokio::spawn(async move {
                if let Some(handle) = rfd::AsyncFileDialog::new()
                    .add_filter("JSON", &["json"])
                    .set_file_name(DEFAULT_EXPORT_FILE_NAME)
                    .save_file()
                    .await
                {
                    let path = handle.path();
                    let result = match std::fs::write(path, json) {
                        Ok(()) => FileOperationResult::SaveCompleted(path.display().to_string()),
                        Err(e) => FileOperationResult::SaveFailed(format!(
                            "failed to write {}: {e}",
                            path.display()
                        )),
                    };
                    if let Some(tx) = sender {
                        let _ = tx.send(result);
                    }
                }
                ctx.request_repaint();
            });
        }
    }

    fn start_import(&mut self, ctx: &egui::Context) {
        let ctx = ctx.clone();
        let sender = self.file.file_operation_sender.clone();

        #[cfg(target_arch = "wasm32")]
        {
            wasm_bindgen_futures::spawn_local(async move {
                match Self::show_open_file_picker().await {
                    Some(file) => {
                        let name = file.name();
                        let result = match Self::read_file(file).await {
                            Ok(content) => FileOperationResult::LoadCompleted(name, content),
                            Err(e) => FileOperationResult::LoadFailed(e),
                        };
                        if let Some(tx) = sender {
                            let _ = tx.send(result);
                        }
                    }
                    None => log::debug!("open dialog cancelled"),
                }
                ctx.request_repaint();
            });
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            tokio::spawn(async move {
                if let Some(handle) = rfd::AsyncFileDialog::new()
                    .add_filter("JSON", &["json"])
                    .pick_file()
                    .await
                {
                    let path = handle.path();
                    let result = match std::fs::read_to_string(path) {
                        Ok(json) => {
                            FileOperationResult::LoadCompleted(path.display().to_string(), json)
                        }
                        Err(e) => FileOperationResult::LoadFailed(format!(
                            "failed to read {}: {e}",
                            path.display()
                        )),
                    };
                    if let Some(tx) = sender {
                        let _ = tx.send(result);
                    }
                }
                ctx.request_repaint();
            });
        }
    }

    /// Triggers a file download in the browser (WASM only).
    ///
    /// Creates a temporary anchor element with a blob URL and clicks it.
    #[cfg(target_arch = "wasm32")]
    fn trigger_download(filename: &str, content: &str) -> Result<(), String> {
        use wasm_bindgen::JsCast;

        let window = web_sys::window().ok_or("No window found")?;
        let document = window.document().ok_or("No document found")?;

        let blob_parts = js_sys::Array::new();
        blob_parts.push(&wasm_bindgen::JsValue::from_str(content));

        let blob_options = web_sys::BlobPropertyBag::new();
        blob_options.set_type("application/json");

        let blob = web_sys::Blob::new_with_str_sequence_and_options(&blob_parts, &blob_options)
            .map_err(|_| "Failed to create blob")?;
        let url = web_sys::Url::create_object_url_with_blob(&blob)
            .map_err(|_| "Failed to create object URL")?;

        let anchor = document
            .create_element("a")
            .map_err(|_| "Failed to create anchor element")?
            .dyn_into::<web_sys::HtmlAnchorElement>()
            .map_err(|_| "Failed to cast to anchor element")?;

        anchor.set_href(&url);
        anchor.set_download(filename);
        anchor.style().set_property("display", "none").ok();

        let body = document.body().ok_or("No body found")?;
        body.append_child(&anchor)
            .map_err(|_| "Failed to append anchor")?;
        anchor.click();
        body.remove_child(&anchor)
            .map_err(|_| "Failed to remove anchor")?;

        web_sys::Url::revoke_object_url(&url).map_err(|_| "Failed to revoke object URL")?;

        Ok(())
    }

    /// Opens a file picker in the browser (WASM only).
    ///
    /// Returns `None` if the user cancelled or the picker could not be created.
    #[cfg(target_arch = "wasm32")]
    async fn show_open_file_picker() -> Option<web_sys::File> {
        use wasm_bindgen::closure::Closure;
        use wasm_bindgen::JsCast;

        let window = web_sys::window()?;
        let document = window.document()?;

        let input = document
            .create_element("input")
            .ok()?
            .dyn_into::<web_sys::HtmlInputElement>()
            .ok()?;

        input.set_type("file");
        input.set_accept(".json,application/json");
        input.style().set_property("display", "none").ok()?;

        let (sender, receiver) = futures::channel::oneshot::channel::<Option<web_sys::File>>();
        let sender = std::rc::Rc::new(std::cell::RefCell::new(Some(sender)));

        let onchange = Closure::wrap(Box::new(move |event: web_sys::Event| {
            let input = event
                .target()
                .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok());

            if let Some(input) = input {
                let file = input.files().and_then(|files| files.get(0));
                if let Some(sender) = sender.borrow_mut().take() {
                    let _ = sender.send(file);
                }
            }
        }) as Box<dyn FnMut(_)>);

        input.set_onchange(Some(onchange.as_ref().unchecked_ref()));
        onchange.forget();

        document.body()?.append_child(&input).ok()?;
        input.click();

        let file = receiver.await.ok()??;

        document.body()?.remove_child(&input).ok()?;

        Some(file)
    }

    /// Reads a browser `File` as text (WASM only).
    #[cfg(target_arch = "wasm32")]
    async fn read_file(file: web_sys::File) -> Result<String, String> {
        use wasm_bindgen::JsCast;
        use wasm_bindgen::JsValue;

        let file_reader =
            web_sys::FileReader::new().map_err(|_| "Failed to create FileReader".to_string())?;

        let promise = js_sys::Promise::new(&mut |resolve, reject| {
            let reader = file_reader.clone();

            let onload = wasm_bindgen::closure::Closure::wrap(Box::new(
                move |_event: web_sys::ProgressEvent| {
                    if let Ok(result) = reader.result() {
                        let _ = resolve.call1(&JsValue::NULL, &result);
                    }
                },
            ) as Box<dyn FnMut(_)>);
            file_reader.set_onload(Some(onload.as_ref().unchecked_ref()));
            onload.forget();

            let onerror = wasm_bindgen::closure::Closure::wrap(Box::new(
                move |_event: web_sys::ProgressEvent| {
                    let _ = reject.call1(&JsValue::NULL, &JsValue::from_str("Failed to read file"));
                },
            ) as Box<dyn FnMut(_)>);
            file_reader.set_onerror(Some(onerror.as_ref().unchecked_ref()));
            onerror.forget();
        });

        file_reader
            .read_as_text(&file)
            .map_err(|_| "Failed to start reading file".to_string())?;

        let result = wasm_bindgen_futures::JsFuture::from(promise)
            .await
            .map_err(|e| format!("Failed to read file: {:?}", e))?;

        result
            .as_string()
            .ok_or_else(|| "File content is not a string".to_string())
    }

    /// Requests an export of the blueprint to a JSON file.
    pub fn save_blueprint(&mut self) {
        self.file.pending_operation = Some(PendingFileOperation::Export);
    }

    /// Requests a JSON file to replace the current blueprint.
    pub fn load_blueprint(&mut self) {
        self.file.pending_operation = Some(PendingFileOperation::Import);
    }
}

//! Pin list: one row per marker with description editing, image upload, and
//! deletion for authenticated sessions.
//!
//! Pure display and delegation: the only state held here is the transient
//! description draft per row. Every persisted change goes up to the map
//! screen's board handlers.

use dioxus::prelude::*;
use store::{MarkerId, PointOfInterest};

use crate::icons::{FaTrash, FaUpload};
use crate::Icon;

/// An image picked in the list, ready for the upload server function.
#[derive(Clone, PartialEq)]
pub struct ImageUpload {
    pub id: MarkerId,
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[component]
pub fn PinList(
    markers: ReadOnlySignal<Vec<PointOfInterest>>,
    authenticated: bool,
    on_edit_description: EventHandler<(MarkerId, String)>,
    on_attach_image: EventHandler<ImageUpload>,
    on_delete: EventHandler<MarkerId>,
) -> Element {
    rsx! {
        aside {
            class: "pin-list",
            h2 { class: "pin-list-title", "Points of interest" }
            if markers().is_empty() {
                p {
                    class: "pin-list-empty",
                    if authenticated {
                        "No pins yet. Click the map to drop one."
                    } else {
                        "No pins yet."
                    }
                }
            }
            for marker in markers() {
                PinRow {
                    key: "{marker.id}",
                    marker: marker.clone(),
                    authenticated,
                    on_edit_description,
                    on_attach_image,
                    on_delete,
                }
            }
        }
    }
}

#[component]
fn PinRow(
    marker: PointOfInterest,
    authenticated: bool,
    on_edit_description: EventHandler<(MarkerId, String)>,
    on_attach_image: EventHandler<ImageUpload>,
    on_delete: EventHandler<MarkerId>,
) -> Element {
    let mut draft = use_signal(|| marker.description.clone().unwrap_or_default());
    let mut uploading = use_signal(|| false);

    let id_for_save = marker.id.clone();
    let handle_save = move |_| {
        on_edit_description.call((id_for_save.clone(), draft()));
    };

    let id_for_delete = marker.id.clone();
    let handle_delete = move |_| {
        on_delete.call(id_for_delete.clone());
    };

    let id_for_upload = marker.id.clone();
    let handle_pick_image = move |evt: FormEvent| {
        let mut files = evt.files();
        let Some(file) = files.pop() else {
            return;
        };

        let id = id_for_upload.clone();
        uploading.set(true);
        spawn(async move {
            match file.read_bytes().await {
                Ok(bytes) => on_attach_image.call(ImageUpload {
                    id,
                    filename: file.name(),
                    content_type: file.content_type().unwrap_or_default(),
                    bytes: bytes.to_vec(),
                }),
                Err(err) => tracing::error!("failed to read selected file: {err}"),
            }
            uploading.set(false);
        });
    };

    rsx! {
        div {
            class: "pin-row",
            div {
                class: "pin-coords",
                {format!("{:.5}, {:.5}", marker.position.lat, marker.position.lng)}
            }
            if let Some(url) = marker.image_url.clone() {
                img { class: "pin-thumb", src: "{url}", alt: "" }
            }
            if authenticated {
                div {
                    class: "pin-editor",
                    input {
                        class: "pin-description-input",
                        r#type: "text",
                        placeholder: "Add a description",
                        value: draft(),
                        oninput: move |evt| draft.set(evt.value()),
                    }
                    button {
                        class: "pin-save",
                        onclick: handle_save,
                        "Save"
                    }
                }
                div {
                    class: "pin-actions",
                    label {
                        class: "pin-upload",
                        Icon { icon: FaUpload, width: 14, height: 14 }
                        if uploading() { " Uploading..." } else { " Image" }
                        input {
                            r#type: "file",
                            accept: "image/*",
                            disabled: uploading(),
                            onchange: handle_pick_image,
                        }
                    }
                    button {
                        class: "pin-delete",
                        onclick: handle_delete,
                        Icon { icon: FaTrash, width: 14, height: 14 }
                    }
                }
            } else {
                p {
                    class: "pin-description",
                    {marker.description.clone().unwrap_or_else(|| "No description yet".to_string())}
                }
            }
        }
    }
}

use dioxus::prelude::*;

#[component]
pub fn Navbar(children: Element) -> Element {
    rsx! {
        header {
            class: "navbar",
            span { class: "navbar-brand", "PinMap" }
            nav {
                class: "navbar-links",
                {children}
            }
        }
    }
}

//! Copy-to-clipboard button for the connected address.

use gloo::timers::callback::Timeout;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::window;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct CopyAddressProps {
    pub address: String,
}

#[function_component(CopyAddress)]
pub fn copy_address(props: &CopyAddressProps) -> Html {
    let copied = use_state(|| false);

    let on_copy = {
        let address = props.address.clone();
        let copied = copied.clone();

        Callback::from(move |_: MouseEvent| {
            let address = address.clone();
            let copied = copied.clone();

            spawn_local(async move {
                let Some(window) = window() else {
                    return;
                };
                let clipboard = js_sys::Reflect::get(&window.navigator(), &"clipboard".into())
                    .ok()
                    .and_then(|v| v.dyn_into::<web_sys::Clipboard>().ok());
                let Some(clipboard) = clipboard else {
                    log::warn!("Clipboard API unavailable");
                    return;
                };

                if let Err(e) = wasm_bindgen_futures::JsFuture::from(clipboard.write_text(&address)).await {
                    log::warn!("Failed to copy address: {:?}", e);
                    return;
                }
                copied.set(true);
                let copied_reset = copied.clone();
                Timeout::new(2000, move || copied_reset.set(false)).forget();
            });
        })
    };

    let label = if *copied { "Copied!" } else { "Copy Address" };

    html! {
        <button class={classes!("menu-item", (*copied).then_some("copied"))} onclick={on_copy}>
            { label }
        </button>
    }
}

mod components;
mod config;
mod hooks;
mod js;
mod providers;
mod storage;
pub mod utils;

use components::{CompatNotice, ConnectButton, TransferForm, WalletCard, WalletContextProvider};
use yew::prelude::*;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[function_component(App)]
fn app() -> Html {
    html! {
        <WalletContextProvider>
            <header class="app-header">
                <h1 class="app-title">{ "Wallet Portal" }</h1>
                <ConnectButton />
            </header>
            <main class="app-main">
                <CompatNotice />
                <WalletCard />
                <TransferForm />
            </main>
            <footer class="app-footer">{ format!("v{}", VERSION) }</footer>
        </WalletContextProvider>
    }
}

#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn run_app() {
    wasm_logger::init(wasm_logger::Config::default());
    yew::Renderer::<App>::new().render();
}

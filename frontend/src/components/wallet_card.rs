use crate::hooks::use_wallet;
use wallet_session::ConnectionPhase;
use yew::prelude::*;

/// Summary of the connected account, or a prompt to connect.
#[function_component(WalletCard)]
pub fn wallet_card() -> Html {
    let wallet = use_wallet();
    let state = &wallet.state;

    let Some(info) = state.wallet_info() else {
        let message = match state.phase() {
            ConnectionPhase::Connecting => "Waiting for the wallet extension...",
            _ => "Connect a wallet to see your address, balance and network.",
        };
        return html! {
            <section class="wallet-card empty">
                <p>{ message }</p>
            </section>
        };
    };

    html! {
        <section class="wallet-card">
            <div class="wallet-card-row">
                <span class="wallet-card-label">{ "Wallet" }</span>
                <span class="wallet-card-value">{ info.wallet_type.label() }</span>
            </div>
            <div class="wallet-card-row">
                <span class="wallet-card-label">{ "Address" }</span>
                <span class="wallet-card-value mono" title={info.address.clone()}>
                    { info.short_address() }
                </span>
            </div>
            <div class="wallet-card-row">
                <span class="wallet-card-label">{ "Balance" }</span>
                <span class="wallet-card-value">
                    { info.balance_display.clone().unwrap_or_else(|| "...".to_string()) }
                </span>
            </div>
            <div class="wallet-card-row">
                <span class="wallet-card-label">{ "Network" }</span>
                <span class="wallet-card-value">{ &info.network_label }</span>
            </div>
        </section>
    }
}

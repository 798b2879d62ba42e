//! Native-currency transfer, signed by the connected extension.

use crate::hooks::use_wallet;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[function_component(TransferForm)]
pub fn transfer_form() -> Html {
    let wallet = use_wallet();
    let recipient = use_state(String::new);
    let amount = use_state(String::new);
    let last_tx = use_state(|| None::<String>);

    let on_recipient = {
        let recipient = recipient.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                recipient.set(input.value());
            }
        })
    };

    let on_amount = {
        let amount = amount.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                amount.set(input.value());
            }
        })
    };

    let on_submit = {
        let session = wallet.session.clone();
        let recipient = recipient.clone();
        let amount = amount.clone();
        let last_tx = last_tx.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let session = session.clone();
            let to = (*recipient).clone();
            let value = (*amount).clone();
            let amount = amount.clone();
            let last_tx = last_tx.clone();
            spawn_local(async move {
                // Failures land in the session's last_error.
                if let Ok(tx) = session.send_transfer(&to, &value).await {
                    amount.set(String::new());
                    last_tx.set(Some(tx));
                }
            });
        })
    };

    let Some(info) = wallet.state.wallet_info() else {
        return html! {};
    };
    if !wallet.session.can_transfer() {
        return html! {
            <section class="transfer-form unsupported">
                <p>{ format!("Transfers are not available for {} yet.", info.wallet_type.label()) }</p>
            </section>
        };
    }

    let loading = wallet.state.is_loading;
    html! {
        <form class="transfer-form" onsubmit={on_submit}>
            <h3>{ format!("Send {}", info.wallet_type.symbol()) }</h3>
            <label for="transfer-recipient">{ "Recipient" }</label>
            <input
                id="transfer-recipient"
                type="text"
                placeholder="0x..."
                value={(*recipient).clone()}
                oninput={on_recipient}
                disabled={loading}
            />
            <label for="transfer-amount">{ "Amount" }</label>
            <input
                id="transfer-amount"
                type="text"
                inputmode="decimal"
                placeholder="0.0"
                value={(*amount).clone()}
                oninput={on_amount}
                disabled={loading}
            />
            <button type="submit" disabled={loading}>
                { if loading { "Waiting for wallet..." } else { "Send" } }
            </button>
            if let Some(tx) = &*last_tx {
                <p class="transfer-result">
                    { "Submitted: " }<span class="mono">{ tx }</span>
                </p>
            }
        </form>
    }
}

use crate::hooks::{use_wallet_session, WalletContext};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct WalletContextProviderProps {
    pub children: Children,
}

/// Owns the page's wallet session; descendants read it with `use_wallet()`.
#[function_component(WalletContextProvider)]
pub fn wallet_context_provider(props: &WalletContextProviderProps) -> Html {
    let context = use_wallet_session();

    html! {
        <ContextProvider<WalletContext> {context}>
            { props.children.clone() }
        </ContextProvider<WalletContext>>
    }
}

//! Header button: wallet picker while disconnected, account menu once
//! connected.

use super::CopyAddress;
use crate::hooks::{use_wallet, use_wallet_availability};
use crate::utils;
use wallet_session::{WalletInfo, WalletType};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
struct WalletOptionProps {
    wallet: WalletType,
    available: bool,
    disabled: bool,
    on_select: Callback<WalletType>,
}

#[function_component(WalletOption)]
fn wallet_option(props: &WalletOptionProps) -> Html {
    let wallet = props.wallet;

    if !props.available {
        let on_install = Callback::from(move |_: MouseEvent| {
            utils::open_in_new_tab(wallet.install_url(utils::is_firefox()));
        });
        return html! {
            <div class="wallet-option unavailable">
                <span class="wallet-option-name">{ wallet.label() }</span>
                <button class="install-link" onclick={on_install}>{ "Install" }</button>
            </div>
        };
    }

    let onclick = {
        let on_select = props.on_select.clone();
        Callback::from(move |_: MouseEvent| on_select.emit(wallet))
    };
    html! {
        <button class="wallet-option" disabled={props.disabled} {onclick}>
            <span class="wallet-option-name">{ wallet.label() }</span>
            <span class="wallet-option-symbol">{ wallet.symbol() }</span>
        </button>
    }
}

#[derive(Properties, PartialEq)]
struct AccountMenuProps {
    info: WalletInfo,
    on_refresh: Callback<()>,
    on_disconnect: Callback<()>,
}

#[function_component(AccountMenu)]
fn account_menu(props: &AccountMenuProps) -> Html {
    let explorer_url = props.info.explorer_url();
    let on_explorer = Callback::from(move |_: MouseEvent| utils::open_in_new_tab(&explorer_url));
    let on_refresh = props.on_refresh.reform(|_: MouseEvent| ());
    let on_disconnect = props.on_disconnect.reform(|_: MouseEvent| ());

    html! {
        <div class="wallet-menu">
            <div class="wallet-menu-header">
                <span class="wallet-menu-label">{ props.info.wallet_type.label() }</span>
                <span class="wallet-menu-network">{ &props.info.network_label }</span>
            </div>
            <CopyAddress address={props.info.address.clone()} />
            <button class="menu-item" onclick={on_explorer}>{ "View on Explorer" }</button>
            <button class="menu-item" onclick={on_refresh}>{ "Refresh Balance" }</button>
            <button class="menu-item danger" onclick={on_disconnect}>{ "Disconnect" }</button>
        </div>
    }
}

#[function_component(ConnectButton)]
pub fn connect_button() -> Html {
    let wallet = use_wallet();
    let availability = use_wallet_availability(&wallet.session);
    let menu_open = use_state(|| false);

    let toggle_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |_: MouseEvent| menu_open.set(!*menu_open))
    };

    let on_select = {
        let wallet = wallet.clone();
        let menu_open = menu_open.clone();
        Callback::from(move |wallet_type: WalletType| {
            menu_open.set(false);
            wallet.connect(wallet_type);
        })
    };

    let on_refresh = {
        let wallet = wallet.clone();
        Callback::from(move |_: ()| wallet.refresh_balance())
    };

    let on_disconnect = {
        let wallet = wallet.clone();
        let menu_open = menu_open.clone();
        Callback::from(move |_: ()| {
            menu_open.set(false);
            wallet.disconnect();
        })
    };

    let state = &wallet.state;
    let loading = state.is_loading;

    let button = match state.wallet_info() {
        Some(info) => html! {
            <button class="connect-button connected" onclick={toggle_menu} disabled={loading}>
                <span class="connect-button-address">{ info.short_address() }</span>
                if let Some(balance) = &info.balance_display {
                    <span class="connect-button-balance">{ balance }</span>
                }
            </button>
        },
        None => html! {
            <button class="connect-button" onclick={toggle_menu} disabled={loading}>
                { if loading { "Connecting..." } else { "Connect Wallet" } }
            </button>
        },
    };

    let dropdown = if !*menu_open {
        html! {}
    } else if let Some(info) = state.wallet_info() {
        html! {
            <AccountMenu info={info.clone()} {on_refresh} {on_disconnect} />
        }
    } else {
        html! {
            <div class="wallet-picker">
                { for availability.iter().map(|(wallet_type, available)| html! {
                    <WalletOption
                        key={wallet_type.as_str()}
                        wallet={*wallet_type}
                        available={*available}
                        disabled={loading}
                        on_select={on_select.clone()}
                    />
                }) }
            </div>
        }
    };

    html! {
        <div class="connect-button-container">
            { button }
            { dropdown }
            if let Some(error) = &state.last_error {
                <div class="wallet-error" title={error.kind.code()}>
                    { &error.message }
                </div>
            }
        </div>
    }
}

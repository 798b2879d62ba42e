use crate::utils;
use yew::prelude::*;

/// Banner shown when the browser is unsupported or mobile.
#[function_component(CompatNotice)]
pub fn compat_notice() -> Html {
    let compat = use_memo((), |_| utils::browser_compatibility());

    if compat.compatible && !compat.mobile {
        return html! {};
    }

    let class = if compat.compatible {
        "compat-notice warning"
    } else {
        "compat-notice error"
    };
    html! {
        <div {class}>{ &compat.message }</div>
    }
}

use yew::prelude::*;

use crate::components::atoms::raw_html::RawHtml;

#[derive(PartialEq, Properties)]
pub struct Props {
    pub message: AttrValue,
    pub on_close: Callback<()>,
}

/// Content of an alert node; the node itself carries the alert classes.
#[function_component(NotificationBanner)]
pub fn notification_banner(props: &Props) -> Html {
    let on_close_click = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| {
            on_close.emit(());
        })
    };

    html! {
        <>
            <RawHtml html={props.message.clone()} />
            <button type="button" class="btn-close" aria-label="Close" onclick={on_close_click}></button>
        </>
    }
}

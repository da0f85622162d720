use yew::{function_component, AttrValue, Html, Properties};

#[derive(Properties, PartialEq)]
pub struct Props {
    pub html: AttrValue,
}

/// Inserts caller-trusted markup as is.
#[function_component(RawHtml)]
pub fn raw_html(props: &Props) -> Html {
    Html::from_html_unchecked(props.html.clone())
}

use yew::prelude::*;

#[derive(Properties, Clone, PartialEq)]
pub struct Props {
    pub error: AttrValue,
    pub onretry: Callback<MouseEvent>,
}

#[function_component(LoadFailed)]
pub fn load_failed(props: &Props) -> Html {
    html! {
        <div class="load-failed">
            <p>{ "This view failed to load." }</p>
            <p class="detail">{ props.error.clone() }</p>
            <button onclick={props.onretry.clone()}>{ "Retry" }</button>
        </div>
    }
}

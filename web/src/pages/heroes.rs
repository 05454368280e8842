use yew::prelude::*;

use crate::shared::Lookup;

#[function_component(HeroList)]
pub fn hero_list() -> Html {
    html! {
        <div class="hero-list">
            <h1>{ "Heroes" }</h1>
            <Lookup route="HeroDetail" param="hero_name" placeholder="Hero name" />
        </div>
    }
}

#[derive(Properties, Clone, PartialEq)]
pub struct HeroDetailProps {
    pub hero_name: AttrValue,
}

#[function_component(HeroDetail)]
pub fn hero_detail(props: &HeroDetailProps) -> Html {
    html! {
        <div class="hero-detail">
            <h1>{ props.hero_name.clone() }</h1>
        </div>
    }
}

use yew::prelude::*;
use yew_router::prelude::*;

use crate::Route;

#[function_component(NotFound)]
pub fn not_found() -> Html {
    html! {
        <div class="not-found">
            <h1>{"Nothing on this shelf"}</h1>
            <p>{"The page you were looking for isn't here."}</p>
            <Link<Route> to={Route::Home} classes="forward-link">
                {"Back to the shop"}
            </Link<Route>>
        </div>
    }
}

use chrono::NaiveDate;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::config::MAX_ITEM_QUANTITY;
use crate::order::builder::{OrderAction, OrderBuilder, WizardStep, STEP_COUNT};
use crate::order::delivery::Frequency;

/// Quantity typed into an item input. Unparsable text yields `None`.
pub fn parse_quantity(value: &str) -> Option<i64> {
    value.trim().parse::<i64>().ok()
}

/// Quantity to apply while the user is still typing. Zero, negatives and
/// blanks wait for the change event, which clamps them.
pub fn live_quantity(value: &str) -> Option<i64> {
    parse_quantity(value).filter(|&quantity| quantity >= 1)
}

#[derive(Properties, PartialEq)]
pub struct OrderModalProps {
    pub builder: OrderBuilder,
    pub open: bool,
    pub today: NaiveDate,
    #[prop_or_default]
    pub highlighted: Option<String>,
    pub on_action: Callback<OrderAction>,
    pub on_close: Callback<()>,
}

#[function_component(OrderModal)]
pub fn order_modal(props: &OrderModalProps) -> Html {
    let builder = &props.builder;
    let summary = builder.summary(props.today);
    let step = builder.step();

    let emit = |action: OrderAction| {
        let on_action = props.on_action.clone();
        Callback::from(move |_: MouseEvent| on_action.emit(action.clone()))
    };

    let close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    let on_frequency = {
        let on_action = props.on_action.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Some(frequency) = Frequency::from_value(&select.value()) {
                on_action.emit(OrderAction::SetFrequency(frequency));
            }
        })
    };

    let step_class = |s: WizardStep, extra: &'static str| {
        classes!("modal-step", extra, (s == step).then(|| "active-step"))
    };

    let item_list = html! {
        <ul class="selected-items-list">
            { for builder.cart().items().iter().map(|item| {
                let name = item.name.clone();
                let on_change = {
                    let on_action = props.on_action.clone();
                    let name = name.clone();
                    Callback::from(move |e: Event| {
                        let input: HtmlInputElement = e.target_unchecked_into();
                        let quantity = parse_quantity(&input.value()).unwrap_or(1);
                        on_action.emit(OrderAction::SetQuantity { name: name.clone(), quantity });
                    })
                };
                let on_input = {
                    let on_action = props.on_action.clone();
                    let name = name.clone();
                    Callback::from(move |e: InputEvent| {
                        let input: HtmlInputElement = e.target_unchecked_into();
                        if let Some(quantity) = live_quantity(&input.value()) {
                            on_action.emit(OrderAction::SetQuantity { name: name.clone(), quantity });
                        }
                    })
                };
                let highlighted = props.highlighted.as_deref() == Some(item.name.as_str());
                html! {
                    <li key={name.clone()} data-item={name.clone()} class={classes!(highlighted.then(|| "highlight"))}>
                        <span class="item-name">{ name.clone() }</span>
                        <div class="item-controls">
                            <input
                                type="number"
                                class="item-quantity"
                                min="1"
                                max={MAX_ITEM_QUANTITY.to_string()}
                                value={item.quantity.to_string()}
                                aria-label={format!("{} quantity", name)}
                                onchange={on_change}
                                oninput={on_input}
                            />
                            <button
                                class="remove-item"
                                aria-label={format!("Remove {}", name)}
                                onclick={emit(OrderAction::RemoveItem(name.clone()))}
                            >
                                {"×"}
                            </button>
                        </div>
                    </li>
                }
            }) }
            {
                if let Some(message) = builder.cart().placeholder().message() {
                    html! { <p class="empty-pack-message">{ message }</p> }
                } else {
                    html! {}
                }
            }
        </ul>
    };

    html! {
        <>
            <div id="modalOverlay" class={classes!("modal-overlay", props.open.then(|| "active"))} onclick={close.clone()}></div>
            <div id="orderModal" class={classes!("modal", props.open.then(|| "active"))} role="dialog" aria-modal="true" aria-labelledby="modalTitle">
                <div class="modal-header">
                    <h2 id="modalTitle">{ builder.origin().title() }</h2>
                    <button class="close-modal-btn" aria-label="Close" onclick={close}>{"×"}</button>
                </div>

                <ol class="step-indicator" aria-label={format!("Step {} of {}", step.index() + 1, STEP_COUNT)}>
                    { for WizardStep::ALL.iter().map(|&s| html! {
                        <li class={classes!((s == step).then(|| "active"), (s.index() < step.index()).then(|| "done"))}>
                            { s.label() }
                        </li>
                    }) }
                </ol>

                <div class={step_class(WizardStep::PackSelection, "pack-builder")}>
                    {
                        if let Some(note) = builder.origin().ai_note() {
                            html! { <p class="ai-note">{ note }</p> }
                        } else {
                            html! {}
                        }
                    }
                    { item_list }
                    <div class="add-products">
                        { for builder.catalog().products().iter().map(|product| html! {
                            <button
                                class="add-product-chip"
                                onclick={emit(OrderAction::AddItem { name: product.clone(), quantity: 1, merge: true })}
                            >
                                { format!("+ {}", product) }
                            </button>
                        }) }
                    </div>
                    <div class="pack-total">
                        <span class="total-price">{ summary.total_display() }</span>
                        <span class="price-frequency">{ summary.price_suffix() }</span>
                    </div>
                    <button class="next-step-btn" disabled={!builder.can_advance()} onclick={emit(OrderAction::NextStep)}>
                        {"Delivery Details"}
                    </button>
                </div>

                <div class={step_class(WizardStep::DeliveryDetails, "delivery-details")}>
                    <label class="frequency-field">
                        {"How often?"}
                        <select id="deliveryFrequency" onchange={on_frequency}>
                            { for Frequency::ALL.iter().map(|&f| html! {
                                <option value={f.value()} selected={f == builder.frequency()}>{ f.label() }</option>
                            }) }
                        </select>
                    </label>
                    <p class="first-delivery">
                        {"First delivery: "}<span id="firstDeliveryDate">{ summary.next_delivery_display() }</span>
                    </p>
                    <div class="step-buttons">
                        <button class="prev-step-btn" onclick={emit(OrderAction::PrevStep)}>{"Back"}</button>
                        <button class="next-step-btn" onclick={emit(OrderAction::NextStep)}>{"Review Order"}</button>
                    </div>
                </div>

                <div class={step_class(WizardStep::Confirmation, "order-confirmation")}>
                    <dl class="order-summary">
                        <dt>{"Items"}</dt>
                        <dd id="summaryItemsCount">{ summary.item_count.to_string() }</dd>
                        <dt>{"Frequency"}</dt>
                        <dd id="summaryFrequency">{ summary.frequency.label() }</dd>
                        <dt>{"Next delivery"}</dt>
                        <dd id="summaryNextDelivery">{ summary.next_delivery_display() }</dd>
                        <dt>{"Total"}</dt>
                        <dd>
                            <span class="total-price">{ summary.total_display() }</span>
                            {" "}
                            <span class="price-frequency">{ summary.price_suffix() }</span>
                        </dd>
                    </dl>
                    <div class="step-buttons">
                        <button class="prev-step-btn" onclick={emit(OrderAction::PrevStep)}>{"Back"}</button>
                        <button class="checkout-btn" onclick={emit(OrderAction::Checkout)}>{"Confirm Subscription"}</button>
                    </div>
                </div>
            </div>
        </>
    }
}

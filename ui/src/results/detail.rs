use dioxus::prelude::*;

use crate::analysis::StoredResult;
use crate::i18n;
use crate::results::{metric_cards, MetricCard};
use crate::t;

#[component]
pub fn ResultsPanel(result: StoredResult) -> Element {
    let view = result.view();
    let cards = metric_cards(view);
    let notes = view.qc.has_notes().then(|| view.qc.notes.clone());

    rsx! {
        section { id: "resultsContainer", class: "results-card results-panel",
            div { class: "results-card__header",
                h2 { {t!("results-title")} }
                span { class: "results-card__meta", "{view.meta.view}" }
            }

            div { id: "metricsGrid", class: "metrics-grid",
                if cards.is_empty() {
                    p { class: "results-card__placeholder", {t!("results-empty")} }
                }

                for card in cards.into_iter() {
                    {render_card(card)}
                }

                if let Some(notes) = notes {
                    div { class: "metrics-grid__notes",
                        h3 { {t!("results-notes-title")} }
                        ul {
                            for note in notes.iter() {
                                li { "{note}" }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn render_card(card: MetricCard) -> Element {
    let MetricCard {
        label_key,
        value,
        status,
        badge_class,
    } = card;
    let label = i18n::tr(label_key);

    rsx! {
        div { class: "metric-card",
            div { class: "metric-card__body",
                div {
                    div { class: "metric-value", "{value}" }
                    div { class: "metric-label", "{label}" }
                }
                span { class: "qc-badge {badge_class}", "{status}" }
            }
        }
    }
}

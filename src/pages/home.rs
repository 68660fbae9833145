//! Home section with overview tiles and recent activity.

use leptos::prelude::*;

use crate::state::records::RecordsState;

/// Overview tiles fed from the shared records state.
#[component]
pub fn HomePage() -> impl IntoView {
    let records = expect_context::<RwSignal<RecordsState>>();

    // Populate the placeholder inventory once per visit.
    let requested = RwSignal::new(false);
    Effect::new(move || {
        if requested.get() {
            return;
        }
        records.update(RecordsState::load_sample_data);
        requested.set(true);
    });

    view! {
        <section class="home-panel">
            <h2>"Overview"</h2>
            <div class="home-panel__tiles">
                <div class="stat-tile">
                    <span class="stat-tile__value">{move || records.with(|r| r.total_students)}</span>
                    <span class="stat-tile__label">"Students"</span>
                </div>
                <div class="stat-tile">
                    <span class="stat-tile__value">{move || records.with(|r| r.total_classes)}</span>
                    <span class="stat-tile__label">"Classes"</span>
                </div>
                <div class="stat-tile">
                    <span class="stat-tile__value">{move || records.with(|r| r.total_subjects)}</span>
                    <span class="stat-tile__label">"Subjects"</span>
                </div>
                <div class="stat-tile">
                    <span class="stat-tile__value">{move || records.with(|r| r.average_grade)}</span>
                    <span class="stat-tile__label">"Average Grade"</span>
                </div>
            </div>
            <h3>"Recent Activity"</h3>
            <Show
                when=move || records.with(|r| !r.recent_activities.is_empty())
                fallback=|| view! { <p class="home-panel__empty">"No recent activity yet."</p> }
            >
                <ul class="home-panel__activity">
                    {move || {
                        records
                            .with(|r| r.recent_activities.clone())
                            .into_iter()
                            .map(|entry| view! { <li>{entry}</li> })
                            .collect::<Vec<_>>()
                    }}
                </ul>
            </Show>
        </section>
    }
}

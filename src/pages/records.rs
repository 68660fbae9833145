//! Records section: top performers and per-subject averages.

use leptos::prelude::*;

use crate::state::records::RecordsState;

/// Tables over the shared records state.
#[component]
pub fn RecordsPage() -> impl IntoView {
    let records = expect_context::<RwSignal<RecordsState>>();

    view! {
        <section class="records-panel">
            <h2>"Top Performing Students"</h2>
            <table class="records-panel__table">
                <thead>
                    <tr>
                        <th>"Name"</th>
                        <th>"Class"</th>
                        <th>"Grade"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        records
                            .with(|r| r.top_performing_students.clone())
                            .into_iter()
                            .map(|student| {
                                view! {
                                    <tr>
                                        <td>{student.name}</td>
                                        <td>{student.class_name}</td>
                                        <td>{student.grade}</td>
                                    </tr>
                                }
                            })
                            .collect::<Vec<_>>()
                    }}
                </tbody>
            </table>
            <h2>"Subject Performance"</h2>
            <ul class="records-panel__subjects">
                {move || {
                    records
                        .with(|r| r.subject_performance.clone())
                        .into_iter()
                        .map(|subject| {
                            view! {
                                <li>
                                    <span>{subject.name}</span>
                                    <span class="records-panel__grade">{subject.average_grade}</span>
                                </li>
                            }
                        })
                        .collect::<Vec<_>>()
                }}
            </ul>
        </section>
    }
}

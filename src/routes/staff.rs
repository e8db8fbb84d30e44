use axum::{extract::State, response::IntoResponse};
use planora_scheduling::StaffMember;

use crate::{
    routes::AppState,
    template::{Template, filters},
};

#[derive(askama::Template)]
#[template(path = "staff.html")]
pub struct StaffTemplate {
    pub current_path: String,
    pub staff: Vec<StaffMember>,
}

#[tracing::instrument(skip_all)]
pub async fn page(template: Template, State(app): State<AppState>) -> impl IntoResponse {
    let staff = crate::try_page_response!(app.staff.list(), template);

    template
        .render(StaffTemplate {
            current_path: "staff".to_owned(),
            staff,
        })
        .into_response()
}

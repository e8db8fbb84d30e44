use axum::{
    RequestPartsExt,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{Html, IntoResponse, Response},
};
use std::{collections::HashMap, convert::Infallible};

use crate::language::UserLanguage;

pub(crate) mod filters {
    #[askama::filter_fn]
    pub fn t(value: &str, values: &dyn askama::Values) -> askama::Result<String> {
        let preferred_language = askama::get_value::<String>(values, "preferred_language")
            .expect("Unable to get preferred_language from askama::get_value");

        Ok(rust_i18n::t!(value, locale = preferred_language).to_string())
    }

    #[askama::filter_fn]
    pub fn date(value: &time::Date, values: &dyn askama::Values) -> askama::Result<String> {
        let preferred_language = askama::get_value::<String>(values, "preferred_language")
            .expect("Unable to get preferred_language from askama::get_value");

        let weekday = rust_i18n::t!(value.weekday().to_string(), locale = preferred_language);
        let month = rust_i18n::t!(value.month().to_string(), locale = preferred_language);

        Ok(rust_i18n::t!(
            "date_format",
            locale = preferred_language,
            weekday = weekday,
            day = value.day(),
            month = month
        )
        .to_string())
    }

    #[askama::filter_fn]
    pub fn day_number(value: &time::Date, _values: &dyn askama::Values) -> askama::Result<String> {
        Ok(value.day().to_string())
    }

    #[askama::filter_fn]
    pub fn month_year(value: &time::Date, values: &dyn askama::Values) -> askama::Result<String> {
        let preferred_language = askama::get_value::<String>(values, "preferred_language")
            .expect("Unable to get preferred_language from askama::get_value");

        let month = rust_i18n::t!(value.month().to_string(), locale = preferred_language);

        Ok(format!("{month} {}", value.year()))
    }

    #[askama::filter_fn]
    pub fn hour(value: &u8, _values: &dyn askama::Values) -> askama::Result<String> {
        Ok(format!("{value:02}:00"))
    }

    #[askama::filter_fn]
    pub fn price(value: &u32, _values: &dyn askama::Values) -> askama::Result<String> {
        Ok(format!("{}.{:02}", value / 100, value % 100))
    }
}

pub struct Template {
    preferred_language: String,
    pub preferred_language_iso: String,
}

impl Template {
    fn render_with_values<T: askama::Template>(
        &self,
        template: T,
    ) -> Result<String, askama::Error> {
        let mut values: HashMap<&str, Box<dyn std::any::Any>> = HashMap::new();
        values.insert(
            "preferred_language",
            Box::new(self.preferred_language.to_owned()),
        );
        values.insert(
            "preferred_language_iso",
            Box::new(self.preferred_language_iso.to_owned()),
        );

        template.render_with_values(&values)
    }

    pub fn to_string<T: askama::Template>(&self, template: T) -> String {
        match self.render_with_values(template) {
            Ok(html) => html,
            Err(err) => format!("Failed to render template. Error: {err}"),
        }
    }

    pub fn render<T: askama::Template>(&self, template: T) -> Response {
        match self.render_with_values(template) {
            Ok(html) => Html(html).into_response(),
            Err(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to render template. Error: {err}"),
            )
                .into_response(),
        }
    }
}

impl<S: Send + Sync> FromRequestParts<S> for Template {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_language = parts
            .extract::<UserLanguage>()
            .await
            .expect("Unable to extract user languages");

        let preferred_language = user_language
            .preferred_languages()
            .first()
            .cloned()
            .unwrap_or_else(|| "en".to_owned());

        let preferred_language_iso = preferred_language
            .split_once("-")
            .unwrap_or((preferred_language.as_str(), ""))
            .0
            .to_owned();

        Ok(Template {
            preferred_language,
            preferred_language_iso,
        })
    }
}

#[derive(askama::Template)]
#[template(path = "404.html")]
pub struct NotFoundTemplate;

#[derive(askama::Template)]
#[template(path = "500.html")]
pub struct ServerTemplate;

#[derive(askama::Template)]
#[template(path = "partials/toast-success.html")]
pub struct ToastSuccessTemplate<'a> {
    pub message: &'a str,
}

#[derive(askama::Template)]
#[template(path = "partials/toast-error.html")]
pub struct ToastErrorTemplate<'a> {
    pub message: &'a str,
}

#[macro_export]
macro_rules! try_page_response {
    ($result:expr, $template:expr) => {
        match $result.await {
            Ok(r) => r,
            Err(err) => {
                tracing::error!("{err}");

                return $template
                    .render($crate::template::ServerTemplate)
                    .into_response();
            }
        }
    };
}

//! Server-rendered page
//!
//! Header, hero, about, services, demo and footer sections. Only the demo
//! section reads workflow state, through the `DemoView`.

use maud::{DOCTYPE, Markup, html};

use crate::core::{DemoView, Locale, Strings};

/// Seconds between automatic reloads while an analysis is pending
pub const REFRESH_SECONDS: u32 = 1;

/// Page URL for a locale, anchored at the demo section
pub fn demo_url(locale: Locale) -> String {
    format!("/?lang={}#demo", locale.code())
}

pub fn render_page(view: &DemoView, locale: Locale) -> Markup {
    let strings = locale.strings();

    html! {
        (DOCTYPE)
        html lang=(locale.code()) {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                @if view.processing {
                    meta http-equiv="refresh" content=(REFRESH_SECONDS);
                }
                title { (strings.brand) }
                link rel="stylesheet" href="/static/site.css";
            }
            body {
                (header(strings))
                main {
                    (hero(strings))
                    (about(strings))
                    (services(strings))
                    (demo(view, strings, locale))
                }
                (footer(strings))
            }
        }
    }
}

fn header(strings: &Strings) -> Markup {
    html! {
        header.site-header {
            nav {
                h1 { (strings.brand) }
                ul {
                    li { a href="#about" { (strings.nav_about) } }
                    li { a href="#services" { (strings.nav_services) } }
                    li { a href="#contact" { (strings.nav_contact) } }
                    li.lang {
                        a href="/?lang=en" { "EN" }
                        " | "
                        a href="/?lang=fr" { "FR" }
                    }
                }
            }
        }
    }
}

fn hero(strings: &Strings) -> Markup {
    html! {
        section.hero {
            div.hero-body {
                h2 { (strings.hero_title) }
                p { (strings.hero_body) }
                a.button href="#demo" { (strings.hero_cta) " ›" }
            }
        }
    }
}

fn about(strings: &Strings) -> Markup {
    html! {
        section.light id="about" {
            div.container {
                h2 { (strings.about_title) }
                p.lead { (strings.about_body) }
            }
        }
    }
}

fn services(strings: &Strings) -> Markup {
    html! {
        section.muted id="services" {
            div.container {
                h2 { (strings.services_title) }
                div.cards {
                    (service_card(strings.malaria_title, strings.malaria_body))
                }
            }
        }
    }
}

fn service_card(title: &str, description: &str) -> Markup {
    html! {
        div.card {
            h3 { (title) }
            p { (description) }
        }
    }
}

fn demo(view: &DemoView, strings: &Strings, locale: Locale) -> Markup {
    let lang = locale.code();

    html! {
        section.dark id="demo" {
            div.container {
                h2 { (strings.demo_title) }
                div.demo-controls {
                    label for="image-input" { (strings.demo_prompt) }
                    div.row {
                        form method="post" action=(format!("/demo/image?lang={lang}")) enctype="multipart/form-data" {
                            label.upload {
                                span { (strings.upload_label) }
                                input id="image-input" type="file" name="image" accept="image/*" onchange="this.form.submit()";
                            }
                            noscript {
                                button type="submit" { (strings.upload_label) }
                            }
                        }
                        form method="post" action=(format!("/demo/submit?lang={lang}")) {
                            button.analyze type="submit" disabled[!view.submit_enabled] { (strings.analyze_label) }
                        }
                    }
                }

                @if let Some(preview) = &view.preview {
                    div.panel {
                        h3 { (strings.uploaded_heading) }
                        img src=(preview.as_str()) alt=(strings.uploaded_alt);
                    }
                }

                @if view.processing {
                    p.processing { (strings.processing) }
                }

                @if view.error.is_some() {
                    div.error-banner role="alert" {
                        p { (strings.analysis_failed) }
                    }
                }

                @if let Some(result) = &view.result {
                    div.panel {
                        h3 { (strings.results_heading) }
                        img src=(result.as_str()) alt=(strings.result_alt);
                    }
                }
            }
        }
    }
}

fn footer(strings: &Strings) -> Markup {
    html! {
        footer.site-footer id="contact" {
            div.container.columns {
                div {
                    h3 { (strings.brand) }
                    p { (strings.footer_tagline) }
                }
                div {
                    h4 { (strings.footer_links) }
                    ul {
                        li { a href="#about" { (strings.nav_about) } }
                        li { a href="#services" { (strings.nav_services) } }
                        li { a href="#demo" { (strings.nav_demo) } }
                    }
                }
                div {
                    h4 { (strings.footer_contact) }
                    p { (strings.footer_email) }
                    p { (strings.footer_phone) }
                }
            }
            p.rights { (strings.footer_rights) }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{WorkflowState, render};
    use crate::error::ANALYSIS_FAILED_MESSAGE;
    use shared::Locator;

    fn state(image: bool, pending: bool, result: bool, error: bool) -> WorkflowState {
        WorkflowState {
            selected_image: image.then(|| Locator::new("/images/abc").unwrap()),
            result: result.then(|| Locator::new("https://example.com/processed-image.jpg").unwrap()),
            pending,
            error: error.then(|| ANALYSIS_FAILED_MESSAGE.to_string()),
        }
    }

    fn page(state: &WorkflowState, locale: Locale) -> String {
        render_page(&render(state), locale).into_string()
    }

    #[test]
    fn test_static_sections_present() {
        let html = page(&WorkflowState::default(), Locale::En);

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("Revolutionizing Healthcare with AI"));
        assert!(html.contains("id=\"about\""));
        assert!(html.contains("id=\"services\""));
        assert!(html.contains("Malaria Detection"));
        assert!(html.contains("id=\"demo\""));
        assert!(html.contains("info@axiome.com"));
    }

    #[test]
    fn test_empty_state_disables_analyze() {
        let html = page(&WorkflowState::default(), Locale::En);

        assert!(html.contains("accept=\"image/*\""));
        assert!(html.contains("disabled"));
        assert!(!html.contains("Uploaded Image:"));
        assert!(!html.contains("http-equiv=\"refresh\""));
    }

    #[test]
    fn test_ready_state_enables_analyze() {
        let html = page(&state(true, false, false, false), Locale::En);

        assert!(html.contains("Uploaded Image:"));
        assert!(html.contains("src=\"/images/abc\""));
        assert!(!html.contains("disabled"));
    }

    #[test]
    fn test_processing_state_refreshes() {
        let html = page(&state(true, true, false, false), Locale::En);

        assert!(html.contains("Processing image..."));
        assert!(html.contains("http-equiv=\"refresh\""));
        assert!(html.contains("disabled"));
    }

    #[test]
    fn test_error_banner_with_stale_result() {
        let html = page(&state(true, false, true, true), Locale::En);

        assert!(html.contains("role=\"alert\""));
        assert!(html.contains(ANALYSIS_FAILED_MESSAGE));
        assert!(html.contains("Results:"));
    }

    #[test]
    fn test_locale_swaps_text_only() {
        let en = page(&state(true, false, false, true), Locale::En);
        let fr = page(&state(true, false, false, true), Locale::Fr);

        assert!(fr.contains("lang=\"fr\""));
        assert!(fr.contains("Essayez notre démo"));
        assert!(fr.contains("action=\"/demo/submit?lang=fr\""));
        assert!(en.contains("role=\"alert\"") && fr.contains("role=\"alert\""));
    }

    #[test]
    fn test_demo_url() {
        assert_eq!(demo_url(Locale::Fr), "/?lang=fr#demo");
    }
}

// ============================================================================
// LOGIN VIEW - Formulario usuario / contraseña
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, HtmlButtonElement, HtmlInputElement};
use crate::dom::{get_element_by_id, get_typed_element, on_submit, set_style, set_text_content, ElementBuilder};
use crate::services::{ApiClient, LocalStorageBackend, SessionStore};
use crate::state::app_state::AppState;
use crate::utils::texts::*;
use crate::viewmodels::login::{LoginForm, LoginOutcome, LoginViewModel};

/// Renderizar vista de login
pub fn render_login(state: &AppState) -> Result<Element, JsValue> {
    log::info!("🎬 [LOGIN] render_login()");

    let form_state = Rc::new(RefCell::new(LoginForm::default()));

    let brand = ElementBuilder::new("div")?
        .class("login-brand")
        .child(
            ElementBuilder::new("img")?
                .class("login-logo")
                .attr("src", "icons/logo.png")?
                .attr("alt", "Ravens Logo")?
                .build(),
        )?
        .child(ElementBuilder::new("h1")?.text(APP_TITLE).build())?
        .child(ElementBuilder::new("p")?.class("login-subtitle").text(APP_SUBTITLE).build())?
        .build();

    let form = ElementBuilder::new("form")?
        .class("login-box")
        .attr("novalidate", "")?
        .child(brand)?
        .child(input_group(LABEL_USER, "login-user", "text", PLACEHOLDER_USER)?)?
        .child(input_group(LABEL_PASSWORD, "login-pass", "password", PLACEHOLDER_PASSWORD)?)?
        .child(
            ElementBuilder::new("button")?
                .class("btn-primary")
                .id("login-btn")?
                .attr("type", "submit")?
                .text(BTN_LOGIN)
                .build(),
        )?
        .child(
            ElementBuilder::new("p")?
                .class("login-error")
                .id("login-error")?
                .style("display", "none")?
                .build(),
        )?
        .build();

    {
        let state = state.clone();
        let form_state = form_state.clone();
        on_submit(&form, move || {
            if form_state.borrow().busy {
                return;
            }
            let username = input_value("login-user");
            let password = input_value("login-pass");

            form_state.borrow_mut().begin();
            paint_form(&form_state.borrow());

            let state = state.clone();
            let form_state = form_state.clone();
            spawn_local(async move {
                let vm = LoginViewModel::new(ApiClient::new(), SessionStore::new(LocalStorageBackend::new()));
                let outcome = vm.submit(&username, &password).await;
                form_state.borrow_mut().finish(&outcome);
                let next_screen = outcome.next_screen();

                match outcome {
                    LoginOutcome::LoggedIn(session) => {
                        log::info!("✅ [LOGIN] {} autenticado (condominio {})", session.guard_name, session.site_id);
                        state.session.set_session(Some(session));
                    }
                    LoginOutcome::Failed(message) => {
                        log::warn!("❌ [LOGIN] {}", message);
                        paint_form(&form_state.borrow());
                    }
                    LoginOutcome::Ignored => paint_form(&form_state.borrow()),
                }

                if let Some(screen) = next_screen {
                    crate::schedule_navigation(screen);
                }
            });
        })?;
    }

    let screen = ElementBuilder::new("div")?
        .class("login-screen")
        .child(form)?
        .build();

    Ok(screen)
}

fn input_group(label: &str, id: &str, kind: &str, placeholder: &str) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("div")?
        .class("input-group")
        .child(
            ElementBuilder::new("label")?
                .attr("for", id)?
                .text(label)
                .build(),
        )?
        .child(
            ElementBuilder::new("input")?
                .class("form-input")
                .id(id)?
                .attr("type", kind)?
                .attr("placeholder", placeholder)?
                .build(),
        )?
        .build())
}

fn input_value(id: &str) -> String {
    get_typed_element::<HtmlInputElement>(id)
        .map(|input| input.value())
        .unwrap_or_default()
}

/// Sincroniza botón y mensaje de error con el estado del formulario
fn paint_form(form: &LoginForm) {
    if let Some(button) = get_typed_element::<HtmlButtonElement>("login-btn") {
        button.set_disabled(form.busy);
        button.set_text_content(Some(form.button_label()));
    }

    if let Some(error) = get_element_by_id("login-error") {
        match &form.error {
            Some(message) => {
                set_text_content(&error, message);
                let _ = set_style(&error, "display", "block");
            }
            None => {
                let _ = set_style(&error, "display", "none");
            }
        }
    }
}

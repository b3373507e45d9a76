//! Signup form walkthrough
//!
//! Drives a registration form the way a UI would: one `on_input` per edit,
//! then `submit`, then a session watcher greeting the new user. Everything
//! runs against the in-memory providers from `formcheck::testing`.
//!
//! Run with `cargo run --example signup_form`.

use std::sync::Arc;

use formcheck::shell::{RegistrationForm, SessionWatcher, SubmitError};
use formcheck::signup::{signup_engine, ADDRESS, EMAIL, NAME, PASSWORD};
use formcheck::testing::{MemoryIdentity, MemoryProfileStore, RecordingView};
use formcheck::FieldId;

fn type_into(
    form: &mut RegistrationForm<RecordingView, Arc<MemoryIdentity>, Arc<MemoryProfileStore>>,
    field: FieldId,
    value: &str,
) {
    form.view_mut().set_value(field.clone(), value);
    let report = form.on_input(&field);

    let name = field.as_str();
    let errors = form.view().errors_for(name);
    if errors.is_empty() {
        println!("  {name:<8} = {value:?}  ok");
    } else {
        println!("  {name:<8} = {value:?}  {}", errors.join("; "));
    }
    println!(
        "           submit {}",
        if report.all_valid() { "enabled" } else { "disabled" }
    );
}

#[tokio::main]
async fn main() {
    let identity = Arc::new(MemoryIdentity::new());
    let profiles = Arc::new(MemoryProfileStore::new());

    let mut form = RegistrationForm::new(
        signup_engine(),
        RecordingView::new(),
        Arc::clone(&identity),
        Arc::clone(&profiles),
    );

    println!("Filling in the form:");
    type_into(&mut form, EMAIL, "ada@example");
    type_into(&mut form, EMAIL, "ada@example.com");
    type_into(&mut form, NAME, "Ada Lovelace");
    type_into(&mut form, ADDRESS, "12 Main St");
    type_into(&mut form, PASSWORD, "abc123");
    type_into(&mut form, PASSWORD, "Abcdefghijklm1!x");
    type_into(&mut form, PASSWORD, "Abcdef1!");

    println!("\nSubmitting:");
    match form.submit().await {
        Ok(user) => println!("  registered {} ({:?})", user.uid, form.view().notice),
        Err(SubmitError::Invalid(report)) => {
            println!("  refused: {} field(s) invalid", report.invalid_fields().count())
        }
        Err(err) => println!("  failed: {err}"),
    }

    println!("\nSession:");
    let mut session = SessionWatcher::new(RecordingView::new(), Arc::clone(&profiles));
    session.run(&identity).await;
    match &session.view().greeting {
        Some(name) => println!("  Welcome, {name}!"),
        None => println!("  nobody signed in"),
    }
}

//! Contact form walkthrough.
//!
//! Runs the site's page logic against an in-memory document on a virtual
//! clock: a rejected submission, a corrected one, the mail link and the
//! notification lifecycle.
//!
//! Run with:
//!   cargo run --example contact_form
//!   OLOKUN_SUBMIT_DELAY_MS=300 cargo run --example contact_form

use std::time::Duration;

use olokun_site::prelude::*;

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("=== Olokun Contact Form Demo ===\n");

    let settings = match SiteSettings::load() {
        Ok(settings) => settings,
        Err(errors) => {
            eprintln!("{errors}");
            std::process::exit(1);
        }
    };
    let delay = settings.submit_delay();

    let view = MockView::with_contact_form("Enviar Mensagem");
    let mut event_loop = EventLoop::new(Page::new(view, settings));

    println!("1. Submitting with a bad email and no company:");
    event_loop.view_mut().type_into(FieldName::Nome, "Ana Souza");
    event_loop.view_mut().type_into(FieldName::Email, "ana@mareazul");
    event_loop.view_mut().type_into(FieldName::Servico, "Licenciamento Ambiental");
    event_loop.submit();
    for field in event_loop.view().fields_with_errors() {
        println!(
            "   {:<10} {}",
            field,
            event_loop.view().field_error(field).unwrap_or_default()
        );
    }

    println!("\n2. Correcting the fields:");
    event_loop.view_mut().type_into(FieldName::Empresa, "Maré Azul");
    event_loop.dispatch(Event::FieldInput {
        field: FieldName::Empresa,
    });
    event_loop
        .view_mut()
        .type_into(FieldName::Email, "ana@mareazul.com.br");
    event_loop.dispatch(Event::FieldInput {
        field: FieldName::Email,
    });
    println!(
        "   fields with errors: {:?}",
        event_loop.view().fields_with_errors()
    );

    println!("\n3. Submitting again:");
    event_loop.submit();
    if let Some(control) = &event_loop.view().submit {
        println!("   submit control: {:?}", control);
    }

    event_loop.advance(delay);
    println!("\n4. After {:?}:", delay);
    for url in &event_loop.view().opened_urls {
        println!("   opened {url}");
    }
    for notification in &event_loop.view().notifications {
        println!("   [{:?}] {}", notification.kind, notification.message);
    }

    event_loop.advance(Duration::from_millis(5300));
    println!(
        "\n5. Five seconds later, {} notification(s) remain.",
        event_loop.view().notifications.len()
    );
}

//! Invoice resolver tests

mod common;

use std::sync::Arc;

use chrono::{Duration, Utc};
use orderdesk_core::{CoreError, InvoiceOverrides, InvoicePricing, InvoiceService};
use orderdesk_types::{InvoiceId, OrderId};
use uuid::Uuid;

use common::{MockInvoiceRepository, MockOrderRepository, MockRenderer};

type Service = InvoiceService<MockOrderRepository, MockInvoiceRepository>;

fn service(renderer: MockRenderer) -> (Service, MockOrderRepository, MockInvoiceRepository) {
    let orders = MockOrderRepository::new();
    let invoices = MockInvoiceRepository::new();
    let service = InvoiceService::new(
        Arc::new(orders.clone()),
        Arc::new(invoices.clone()),
        Arc::new(renderer),
        InvoicePricing::default(),
    );
    (service, orders, invoices)
}

#[tokio::test]
async fn test_resolve_creates_invoice_from_order() {
    let (invoices, orders, _) = service(MockRenderer::default());
    let mut order = MockOrderRepository::create_test_order("Kati", Utc::now());
    order.payment_status = "paid".to_string();
    order.company = Some("Kati Design".to_string());
    let order_id = order.id;
    orders.insert_order(order);

    let invoice = invoices
        .resolve(OrderId(order_id), InvoiceOverrides::default())
        .await
        .unwrap();

    assert_eq!(invoice.order_id, OrderId(order_id));
    assert_eq!(invoice.subtotal_cents, 2000);
    assert_eq!(invoice.vat_amount_cents, 400);
    assert_eq!(invoice.amount_cents, 2400);
    assert_eq!(invoice.due_date - invoice.invoice_date, Duration::days(14));
    assert_eq!(invoice.status, "paid");
    assert_eq!(invoice.customer_name, "Kati Tester");
    assert_eq!(invoice.company_name.as_deref(), Some("Kati Design"));
    assert_eq!(invoice.bill_to, "private");
    assert_eq!(
        invoice.order_reference,
        format!("ORD-{}", &order_id.to_string()[..8])
    );
    assert!(invoice.invoice_number.starts_with("INV-"));
}

#[tokio::test]
async fn test_resolve_snapshots_orderer_details() {
    let (invoices, orders, _) = service(MockRenderer::default());
    let mut order = MockOrderRepository::create_test_order("Liis", Utc::now());
    order.company = Some("Liis Consulting".to_string());
    let order_id = order.id;
    orders.insert_order(order);

    let invoice = invoices
        .resolve(
            OrderId(order_id),
            InvoiceOverrides {
                customer_name: Some("Accounts Payable".to_string()),
                company_name: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(invoice.customer_name, "Accounts Payable");
    assert_eq!(invoice.orderer_first_name.as_deref(), Some("Liis"));
    assert_eq!(invoice.orderer_last_name.as_deref(), Some("Tester"));
    assert_eq!(invoice.orderer_email.as_deref(), Some("liis@example.com"));
    assert_eq!(invoice.orderer_company.as_deref(), Some("Liis Consulting"));
}

#[tokio::test]
async fn test_resolve_is_idempotent() {
    let (invoices, orders, stored) = service(MockRenderer::default());
    let order = MockOrderRepository::create_test_order("Repeat", Utc::now());
    let order_id = OrderId(order.id);
    orders.insert_order(order);

    let first = invoices
        .resolve(order_id, InvoiceOverrides::default())
        .await
        .unwrap();
    let second = invoices
        .resolve(
            order_id,
            InvoiceOverrides {
                customer_name: Some("Someone Else".to_string()),
                company_name: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(stored.len(), 1);
}

#[tokio::test]
async fn test_concurrent_resolves_share_one_invoice() {
    let (invoices, orders, stored) = service(MockRenderer::default());
    let order = MockOrderRepository::create_test_order("Race", Utc::now());
    let order_id = OrderId(order.id);
    orders.insert_order(order);

    let (a, b) = tokio::join!(
        invoices.resolve(order_id, InvoiceOverrides::default()),
        invoices.resolve(order_id, InvoiceOverrides::default()),
    );

    assert_eq!(a.unwrap().id, b.unwrap().id);
    assert_eq!(stored.len(), 1);
}

#[tokio::test]
async fn test_resolve_unknown_order() {
    let (invoices, _, stored) = service(MockRenderer::default());

    let err = invoices
        .resolve(OrderId(Uuid::new_v4()), InvoiceOverrides::default())
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(stored.len(), 0);
}

#[tokio::test]
async fn test_render_pdf_filename() {
    let (invoices, _, _) = service(MockRenderer::default());
    let id = InvoiceId(Uuid::parse_str("9c5b94b1-35ad-49bb-b118-8e8fc24abf80").unwrap());

    let pdf = invoices.render_pdf(id).await.unwrap();
    assert_eq!(pdf.filename, "invoice-9c5b94b1.pdf");
    assert!(pdf.bytes.starts_with(b"%PDF"));
}

#[tokio::test]
async fn test_render_pdf_keeps_renderer_status() {
    let (invoices, _, _) = service(MockRenderer {
        fail_with: Some(422),
    });

    let err = invoices.render_pdf(InvoiceId::new()).await.unwrap_err();
    assert!(matches!(err, CoreError::Renderer { status: 422, .. }));
}

mod common;

use kitakita_client::categories::CategoryRequest;
use kitakita_client::error::Error;
use kitakita_client::listing::CrudResource;
use kitakita_client::pagination::ListParams;
use kitakita_client::products::{AdjustmentRequest, AdjustmentType, PurchaseStatus};
use kitakita_client::sales::SaleForm;
use serde_json::json;
use wiremock::matchers::{
    body_json, body_partial_json, header, header_exists, method, path, query_param,
};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn product_json(id: i64, quantity: i64, threshold: i64) -> serde_json::Value {
    json!({
        "productId": id,
        "productName": "Chippy",
        "productCode": "P-0001",
        "categoryId": 3,
        "categoryName": "Snacks",
        "buyingPrice": 10.0,
        "sellingPrice": 12.5,
        "unit": "Packets",
        "quantity": quantity,
        "thresholdValue": threshold,
        "openingStock": quantity,
        "onTheWay": 0,
        "expiryDate": "2026-12-11",
        "isActive": true,
        "createdAt": "2025-01-05T08:30:00.123"
    })
}

#[tokio::test]
async fn test_products_list_deserializes_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .and(header("Authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::page_json(
            json!([product_json(1, 5, 10), product_json(2, 0, 10)]),
            0,
            3,
        )))
        .mount(&mock_server)
        .await;

    let (client, _manager, _store) = common::signed_in(&mock_server);
    let page = client.products().list(&ListParams::new()).await.unwrap();

    assert_eq!(page.content.len(), 2);
    assert_eq!(page.total_pages, 3);
    assert!(page.has_next);
    assert_eq!(page.content[0].stock_status().label(), "Low stock");
    assert_eq!(page.content[1].stock_status().label(), "Out of stock");
    assert_eq!(page.content[0].expiry_date.unwrap().to_string(), "2026-12-11");
}

#[tokio::test]
async fn test_product_references_and_pdf_export() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/products/references"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "categories": [{"id": 3, "label": "Snacks"}],
            "suppliers": [{"id": 7, "label": "Kadi Foods"}]
        })))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/products/export/pdf"))
        .and(header("Accept", "application/pdf"))
        .and(query_param("categoryId", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(b"%PDF".to_vec(), "application/pdf"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (client, _manager, _store) = common::signed_in(&mock_server);
    let products = client.products();

    let references = products.references().await.unwrap();
    assert_eq!(references.categories[0].label, "Snacks");
    assert_eq!(references.suppliers[0].id, 7);

    let pdf = products.export_pdf(Some(""), Some(3)).await.unwrap();
    assert_eq!(&pdf[..], b"%PDF");
}

#[tokio::test]
async fn test_product_history_endpoints() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/products/1/purchases"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "purchaseId": 9,
            "purchaseCode": "PO-9",
            "quantity": 10,
            "unitCost": 16.0,
            "totalCost": 160.0,
            "purchaseDate": "2025-02-01T10:00:00",
            "supplierName": "Kadi Foods",
            "status": "completed"
        }])))
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/products/1/adjustments"))
        .and(body_json(json!({
            "productId": 1,
            "adjustmentType": "REMOVE",
            "quantity": 2,
            "reason": "Damaged"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "adjustmentId": 4,
            "productId": 1,
            "adjustmentType": "REMOVE",
            "quantity": 2,
            "reason": "Damaged",
            "performedBy": "Ana Cruz"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (client, _manager, _store) = common::signed_in(&mock_server);
    let products = client.products();

    let purchases = products.purchases(1).await.unwrap();
    assert_eq!(purchases[0].status, Some(PurchaseStatus::Completed));

    let request = AdjustmentRequest {
        product_id: 1,
        adjustment_type: AdjustmentType::Remove,
        quantity: 2,
        reason: Some("Damaged".to_string()),
    };
    let adjustment = products.create_adjustment(1, &request).await.unwrap();
    assert_eq!(adjustment.performed_by.as_deref(), Some("Ana Cruz"));
}

#[tokio::test]
async fn test_categories_crud() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/categories/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "categoryId": 3,
            "categoryName": "Snacks",
            "description": null,
            "createdAt": "2025-01-05T08:30:00"
        })))
        .mount(&mock_server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/categories/3"))
        .and(body_json(json!({"categoryName": "Chips", "description": "Salty"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "categoryId": 3,
            "categoryName": "Chips",
            "description": "Salty"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/categories/3"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (client, _manager, _store) = common::signed_in(&mock_server);
    let categories = client.categories();

    assert_eq!(categories.get(3).await.unwrap().category_name, "Snacks");
    let request = CategoryRequest {
        category_name: "Chips".to_string(),
        description: Some("Salty".to_string()),
    };
    assert_eq!(categories.update(3, &request).await.unwrap().category_name, "Chips");
    categories.remove(3).await.unwrap();
}

#[tokio::test]
async fn test_suppliers_list_ignores_category_filter() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/suppliers"))
        .and(query_param("search", "kadi"))
        .and(|request: &wiremock::Request| {
            !request.url.query_pairs().any(|(key, _)| key == "categoryId")
        })
        .respond_with(ResponseTemplate::new(200).set_body_json(common::page_json(
            json!([{
                "supplierId": 7,
                "supplierName": "Kadi Foods",
                "isActive": true,
                "createdAt": "2025-02-01 08:00:00"
            }]),
            0,
            1,
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (client, _manager, _store) = common::signed_in(&mock_server);
    let params = ListParams::new().with_search("kadi").with_category(Some(3));
    let page = client.suppliers().list(&params).await.unwrap();
    assert_eq!(page.content[0].supplier_name, "Kadi Foods");
}

#[tokio::test]
async fn test_sales_create_and_summary() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/sales"))
        .and(body_partial_json(json!({
            "productId": 1,
            "quantity": 3,
            "unitPrice": 12.5,
            "totalValue": 37.5
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "saleId": 11,
            "saleCode": "S-11",
            "productId": 1,
            "productName": "Chippy",
            "quantity": 3,
            "unitPrice": 12.5,
            "totalValue": 37.5,
            "saleDate": "2025-03-01 14:00:00"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/sales/summary"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"totalSales": 37.5})))
        .mount(&mock_server)
        .await;

    let (client, _manager, _store) = common::signed_in(&mock_server);
    let sales = client.sales();

    let form = SaleForm {
        product_id: "1".to_string(),
        quantity: "3".to_string(),
        unit_price: "12.5".to_string(),
        ..SaleForm::default()
    };
    CrudResource::create(&sales, &form).await.unwrap();

    let summary = sales.summary().await.unwrap();
    assert_eq!(summary["totalSales"], 37.5);

    let err = CrudResource::update(&sales, 11, &form).await.unwrap_err();
    assert!(matches!(err, Error::Unsupported(_)));
}

#[tokio::test]
async fn test_dashboard_and_reports() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/dashboard/summary"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "summaryCards": {"totalProducts": 12, "lowStockCount": 2, "inventoryValue": null},
            "inventoryByCategory": [{"label": "Snacks", "value": 40}]
        })))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/reports"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "salesOverview": {"totalProfit": 100.5, "revenue": 400},
            "bestSellingProducts": [{"product": "Chippy", "productId": 1, "turnOver": 37.5}]
        })))
        .mount(&mock_server)
        .await;

    let (client, _manager, _store) = common::signed_in(&mock_server);

    let summary = client.dashboard().summary().await.unwrap();
    assert_eq!(summary.summary_cards.low_stock_count, 2);
    assert_eq!(summary.summary_cards.inventory_value, 0.0);
    assert_eq!(summary.inventory_by_category[0].value, 40.0);

    let reports = client.reports().get().await.unwrap();
    assert_eq!(reports.sales_overview.total_profit, 100.5);
    assert_eq!(reports.best_selling_products[0].product_id, Some(1));
}

#[tokio::test]
async fn test_resource_calls_without_session_send_no_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/categories"))
        .and(header_exists("Authorization"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/categories"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "Unauthorized"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = common::client(&mock_server);
    let err = client.categories().list().await.unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(err.to_string(), "Unauthorized");
}

//! Static informational pages, served as plain data payloads for the
//! presentation layer to render.

use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Page {
    pub title: &'static str,
    pub sections: Vec<Section>,
}

#[derive(Debug, Serialize)]
pub struct Section {
    pub heading: &'static str,
    pub body: &'static str,
}

pub async fn about() -> Json<Page> {
    Json(Page {
        title: "About",
        sections: vec![
            Section {
                heading: "Who we are",
                body: "A marketplace where independent sellers list their products and buyers shop them directly.",
            },
            Section {
                heading: "Selling",
                body: "Register a seller account to list products, manage stock, and reach buyers.",
            },
        ],
    })
}

pub async fn faq() -> Json<Page> {
    Json(Page {
        title: "Frequently Asked Questions",
        sections: vec![
            Section {
                heading: "How do I place an order?",
                body: "Add products to your cart and check out; the order confirms the prices in effect at that moment.",
            },
            Section {
                heading: "Can I change an order after checkout?",
                body: "Orders are final once placed. Review your cart before checking out.",
            },
            Section {
                heading: "How many of one product can I add at a time?",
                body: "Up to ten units per add, limited by the product's available stock.",
            },
        ],
    })
}

pub async fn contact() -> Json<Page> {
    Json(Page {
        title: "Contact",
        sections: vec![
            Section { heading: "Support", body: "support@storefront.example" },
            Section { heading: "Sellers", body: "sellers@storefront.example" },
        ],
    })
}

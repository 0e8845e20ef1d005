pub const DDL: &str = r#"
CREATE TABLE IF NOT EXISTS eligibility (
  id INTEGER PRIMARY KEY,
  user_id TEXT NOT NULL,
  status TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS ad_sales (
  id INTEGER PRIMARY KEY,
  product_id TEXT NOT NULL,
  ad_spend REAL NOT NULL,
  impressions INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS total_sales (
  id INTEGER PRIMARY KEY,
  order_id TEXT NOT NULL,
  product_name TEXT NOT NULL,
  amount REAL NOT NULL,
  sale_date TEXT NOT NULL
);
"#;

pub const SEED: &str = r#"
INSERT OR IGNORE INTO eligibility (id, user_id, status) VALUES (1, 'user123', 'eligible');
INSERT OR IGNORE INTO eligibility (id, user_id, status) VALUES (2, 'user456', 'not eligible');

INSERT OR IGNORE INTO ad_sales (id, product_id, ad_spend, impressions) VALUES (1, 'prodA', 100.50, 5000);
INSERT OR IGNORE INTO ad_sales (id, product_id, ad_spend, impressions) VALUES (2, 'prodB', 75.20, 3000);

INSERT OR IGNORE INTO total_sales (id, order_id, product_name, amount, sale_date) VALUES (1, 'ORD001', 'Laptop', 1200.00, '2025-07-20');
INSERT OR IGNORE INTO total_sales (id, order_id, product_name, amount, sale_date) VALUES (2, 'ORD002', 'Mouse', 25.50, '2025-07-21');
INSERT OR IGNORE INTO total_sales (id, order_id, product_name, amount, sale_date) VALUES (3, 'ORD003', 'Keyboard', 75.00, '2025-07-21');
INSERT OR IGNORE INTO total_sales (id, order_id, product_name, amount, sale_date) VALUES (4, 'ORD004', 'Laptop', 1500.00, '2025-07-22');
"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableInfo {
    pub name: &'static str,
    pub columns: &'static [&'static str],
    pub seed_rows: u64,
}

/// The tables the translator is allowed to talk about, in prompt order.
pub const KNOWN_TABLES: &[TableInfo] = &[
    TableInfo {
        name: "eligibility",
        columns: &["id", "user_id", "status"],
        seed_rows: 2,
    },
    TableInfo {
        name: "ad_sales",
        columns: &["id", "product_id", "ad_spend", "impressions"],
        seed_rows: 2,
    },
    TableInfo {
        name: "total_sales",
        columns: &["id", "order_id", "product_name", "amount", "sale_date"],
        seed_rows: 4,
    },
];

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::error::AppError;
use crate::models::product::{Product, ProductCreate, ProductUpdate, Statistics};
use crate::store::Catalog;
use crate::tools::pricing::round2;

pub struct SqliteStore {
    db_path: PathBuf,
}

impl SqliteStore {
    pub fn new(app_name: &str) -> Result<Self, AppError> {
        let db_path = default_sqlite_path(app_name)?;
        Self::open_at(db_path)
    }

    pub fn open_at(db_path: PathBuf) -> Result<Self, AppError> {
        init_db(&db_path)?;
        Ok(Self { db_path })
    }

    pub fn is_empty(&self) -> Result<bool, AppError> {
        let conn = self.open()?;
        let any: Option<i64> = conn
            .query_row("SELECT 1 FROM products LIMIT 1;", [], |row| row.get(0))
            .optional()?;
        Ok(any.is_none())
    }

    /// Inserts a product keeping its id; used by seeding only. Regular
    /// creation goes through `Catalog::create` and lets SQLite assign the id.
    pub fn insert_with_id(&self, product: &Product) -> Result<(), AppError> {
        let now = Utc::now().to_rfc3339();
        let conn = self.open()?;
        conn.execute(
            r#"
            INSERT INTO products(id, name, price, category, in_stock, created_at, updated_at)
            VALUES(?1, ?2, ?3, ?4, ?5, ?6, ?6)
            ON CONFLICT(id) DO UPDATE SET
                name=excluded.name,
                price=excluded.price,
                category=excluded.category,
                in_stock=excluded.in_stock,
                updated_at=excluded.updated_at;
            "#,
            params![
                product.id,
                product.name,
                product.price,
                product.category,
                product.in_stock,
                now
            ],
        )?;
        Ok(())
    }

    fn open(&self) -> Result<Connection, AppError> {
        Ok(Connection::open(&self.db_path)?)
    }
}

impl Catalog for SqliteStore {
    fn list(&self, category: Option<&str>) -> Result<Vec<Product>, AppError> {
        let conn = self.open()?;
        let mut stmt =
            conn.prepare("SELECT id, name, price, category, in_stock FROM products ORDER BY id;")?;
        let rows = stmt.query_map([], row_to_product)?;
        let mut products = Vec::new();
        for row in rows {
            products.push(row?);
        }

        // SQLite's LOWER() only folds ASCII, so the case-insensitive category
        // match happens here.
        if let Some(category) = category {
            let needle = category.to_lowercase();
            products.retain(|p| p.category.to_lowercase() == needle);
        }

        Ok(products)
    }

    fn get(&self, product_id: i64) -> Result<Option<Product>, AppError> {
        let conn = self.open()?;
        let product = conn
            .query_row(
                "SELECT id, name, price, category, in_stock FROM products WHERE id=?1;",
                params![product_id],
                row_to_product,
            )
            .optional()?;
        Ok(product)
    }

    fn create(&self, fields: ProductCreate) -> Result<Product, AppError> {
        let now = Utc::now().to_rfc3339();
        let conn = self.open()?;
        conn.execute(
            "INSERT INTO products(name, price, category, in_stock, created_at, updated_at) VALUES(?1, ?2, ?3, ?4, ?5, ?5);",
            params![fields.name, fields.price, fields.category, fields.in_stock, now],
        )?;
        let id = conn.last_insert_rowid();

        Ok(Product {
            id,
            name: fields.name,
            price: fields.price,
            category: fields.category,
            in_stock: fields.in_stock,
        })
    }

    fn update(&self, product_id: i64, fields: ProductUpdate) -> Result<Option<Product>, AppError> {
        if fields.is_empty() {
            return self.get(product_id);
        }

        let Some(mut product) = self.get(product_id)? else {
            return Ok(None);
        };
        if let Some(name) = fields.name {
            product.name = name;
        }
        if let Some(price) = fields.price {
            product.price = price;
        }
        if let Some(category) = fields.category {
            product.category = category;
        }
        if let Some(in_stock) = fields.in_stock {
            product.in_stock = in_stock;
        }

        let conn = self.open()?;
        conn.execute(
            "UPDATE products SET name=?1, price=?2, category=?3, in_stock=?4, updated_at=?5 WHERE id=?6;",
            params![
                product.name,
                product.price,
                product.category,
                product.in_stock,
                Utc::now().to_rfc3339(),
                product_id
            ],
        )?;

        Ok(Some(product))
    }

    fn delete(&self, product_id: i64) -> Result<bool, AppError> {
        let conn = self.open()?;
        let deleted = conn.execute("DELETE FROM products WHERE id=?1;", params![product_id])?;
        Ok(deleted > 0)
    }

    fn statistics(&self) -> Result<Statistics, AppError> {
        let conn = self.open()?;
        let (total_count, average_price, in_stock_count) = conn.query_row(
            r#"
            SELECT
                COUNT(*),
                COALESCE(AVG(price), 0),
                COALESCE(SUM(CASE WHEN in_stock THEN 1 ELSE 0 END), 0)
            FROM products;
            "#,
            [],
            |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, f64>(1)?,
                    row.get::<_, i64>(2)?,
                ))
            },
        )?;

        let mut stmt = conn.prepare("SELECT category, COUNT(*) FROM products GROUP BY category;")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
        })?;
        let mut categories = HashMap::new();
        for row in rows {
            let (category, count) = row?;
            categories.insert(category, count);
        }

        Ok(Statistics {
            total_count,
            average_price: round2(average_price),
            in_stock_count,
            categories,
        })
    }
}

fn row_to_product(row: &Row) -> rusqlite::Result<Product> {
    Ok(Product {
        id: row.get(0)?,
        name: row.get(1)?,
        price: row.get(2)?,
        category: row.get(3)?,
        in_stock: row.get(4)?,
    })
}

fn init_db(db_path: &Path) -> Result<(), AppError> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| AppError::Message(e.to_string()))?;
    }

    let conn = Connection::open(db_path)?;
    conn.execute_batch(
        r#"
        PRAGMA journal_mode=WAL;
        PRAGMA synchronous=NORMAL;
        PRAGMA foreign_keys=ON;

        CREATE TABLE IF NOT EXISTS products (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            price REAL NOT NULL,
            category TEXT NOT NULL,
            in_stock INTEGER NOT NULL DEFAULT 1,
            created_at TEXT,
            updated_at TEXT
        );
        "#,
    )?;

    Ok(())
}

fn default_sqlite_path(app_name: &str) -> Result<PathBuf, AppError> {
    if let Ok(override_path) = std::env::var("STORE_SQLITE_PATH") {
        let mut path = PathBuf::from(override_path);
        if path.is_relative() {
            path = std::env::current_dir()
                .map_err(|e| AppError::Message(e.to_string()))?
                .join(path);
        }
        return Ok(path);
    }

    let base = std::env::var("XDG_DATA_HOME").map(PathBuf::from).unwrap_or_else(|_| {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(".local").join("share")
    });
    Ok(base.join(app_name).join("products.db"))
}

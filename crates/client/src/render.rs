//! Plain-text rendering of a catalog view.

use std::fmt::{self, Write};

use storefront_products::input::{CATEGORY_OPTIONS, RATING_OPTIONS};
use storefront_products::{Product, SortKey};

use crate::controller::CatalogView;
use crate::status::FetchStatus;

const CATALOG_COLUMNS: [&str; 7] = [
    "Id",
    "Title",
    "Price",
    "Category",
    "Description",
    "Image",
    "Rating",
];

/// Renders the filtered list, the sorted list, and the catalog table.
#[derive(Debug, Clone)]
pub struct TextRenderer {
    /// Cells longer than this many characters are cut with an ellipsis.
    pub max_cell_width: usize,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self { max_cell_width: 40 }
    }
}

impl TextRenderer {
    pub fn render(&self, view: &CatalogView) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_view(&mut out, view);
        out
    }

    pub fn write_view<W: Write>(&self, out: &mut W, view: &CatalogView) -> fmt::Result {
        self.write_status(out, view)?;
        self.write_selections(out, view)?;
        self.write_options(out, view)?;
        writeln!(out)?;
        self.write_filtered(out, view)?;
        writeln!(out)?;
        self.write_sorted(out, view)?;
        writeln!(out)?;
        self.write_catalog(out, view)
    }

    fn write_status<W: Write>(&self, out: &mut W, view: &CatalogView) -> fmt::Result {
        match view.status() {
            FetchStatus::Pending => writeln!(out, "Status: loading catalog"),
            FetchStatus::Loaded { fetched_at } => writeln!(
                out,
                "Status: {} products loaded at {}",
                view.catalog().len(),
                fetched_at.format("%Y-%m-%d %H:%M:%S UTC")
            ),
            FetchStatus::Failed { reason } => {
                writeln!(out, "Status: could not load catalog ({reason})")
            }
        }
    }

    fn write_selections<W: Write>(&self, out: &mut W, view: &CatalogView) -> fmt::Result {
        let criteria = view.criteria();
        let max_price = criteria
            .max_price
            .map_or_else(|| "any".to_string(), |p| p.to_string());
        let category = criteria.category.as_deref().unwrap_or("all");
        let min_rating = criteria
            .min_rating
            .map_or_else(|| "all".to_string(), |r| format!("{r}+"));
        let sort = view.sort_key().map_or("catalog order", |k| k.label());

        writeln!(
            out,
            "Price filter: {max_price} | Category: {category} | Rating: {min_rating} | Sort by: {sort}"
        )
    }

    /// Accepted control values, plus any category the catalog adds.
    fn write_options<W: Write>(&self, out: &mut W, view: &CatalogView) -> fmt::Result {
        let mut categories: Vec<&str> = CATEGORY_OPTIONS.iter().map(|(value, _)| *value).collect();
        for category in view.catalog().categories() {
            if !categories.contains(&category) {
                categories.push(category);
            }
        }
        let ratings: Vec<&str> = RATING_OPTIONS.iter().map(|(value, _)| *value).collect();
        let sorts: Vec<&str> = SortKey::ALL.iter().map(SortKey::as_str).collect();

        writeln!(out, "  categories: {}", categories.join(", "))?;
        writeln!(out, "  ratings: {}", ratings.join(", "))?;
        writeln!(out, "  sort: {}", sorts.join(", "))
    }

    fn write_filtered<W: Write>(&self, out: &mut W, view: &CatalogView) -> fmt::Result {
        writeln!(out, "Filtered products ({})", view.filtered_len())?;
        if view.filtered_len() == 0 {
            return writeln!(out, "  no products match the current filters");
        }
        for product in view.filtered() {
            writeln!(
                out,
                "  price: --{} - Category: --{}-- Rating: {}",
                product.price, product.category, product.rating.rate
            )?;
        }
        Ok(())
    }

    fn write_sorted<W: Write>(&self, out: &mut W, view: &CatalogView) -> fmt::Result {
        writeln!(out, "Sorted products ({})", view.sorted_len())?;
        if view.sorted_len() == 0 {
            return writeln!(out, "  no products to show");
        }
        for product in view.sorted() {
            writeln!(
                out,
                "  {} | Price: {} | Rating: {}",
                product.title,
                product.price,
                product.rating.rate.round()
            )?;
        }
        Ok(())
    }

    fn write_catalog<W: Write>(&self, out: &mut W, view: &CatalogView) -> fmt::Result {
        writeln!(out, "Catalog ({})", view.catalog().len())?;
        if view.catalog().is_empty() {
            return writeln!(out, "  catalog is empty");
        }

        let rows: Vec<[String; 7]> = view.catalog().iter().map(|p| self.row(p)).collect();

        let mut widths = CATALOG_COLUMNS.map(|h| h.chars().count());
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let header = CATALOG_COLUMNS.map(str::to_string);
        write_row(out, &header, &widths)?;
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        writeln!(out, "  {}", rule.join("-+-"))?;
        for row in &rows {
            write_row(out, row, &widths)?;
        }
        Ok(())
    }

    fn row(&self, product: &Product) -> [String; 7] {
        [
            product.id.to_string(),
            self.clip(&product.title),
            product.price.to_string(),
            self.clip(&product.category),
            self.clip(&product.description),
            self.clip(&product.image),
            format!("{} ({})", product.rating.rate, product.rating.count),
        ]
    }

    fn clip(&self, text: &str) -> String {
        // Descriptions can span lines.
        let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
        if flat.chars().count() <= self.max_cell_width {
            return flat;
        }
        let keep = self.max_cell_width.saturating_sub(1);
        let mut clipped: String = flat.chars().take(keep).collect();
        clipped.push('…');
        clipped
    }
}

fn write_row<W: Write>(out: &mut W, cells: &[String; 7], widths: &[usize; 7]) -> fmt::Result {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect();
    writeln!(out, "  {}", padded.join(" | ").trim_end())
}

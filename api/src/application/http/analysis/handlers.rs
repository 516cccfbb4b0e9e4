pub mod analyze_barcode;
pub mod analyze_label;
pub mod compare_products;
pub mod scan_barcode;

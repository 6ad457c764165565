pub mod scrollable_paragraph;

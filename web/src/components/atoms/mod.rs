pub mod raw_html;

pub mod notification_banner;

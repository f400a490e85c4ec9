pub mod search_input_top_bar;
pub mod facet_pickers;
pub mod filter_tag_strip;
pub mod listing_controls;
pub mod venue_result_list;
pub mod venue_item_card;

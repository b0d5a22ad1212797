pub mod u601_in_data_form;

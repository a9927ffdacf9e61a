#![forbid(unsafe_code)]

//! System module: parameter configs, data dictionaries, menus.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::{DateRange, PageQuery};
use crate::client::Client;
use crate::dict::DictEntry;
use crate::envelope::{Envelope, PageEnvelope};
use crate::error::Result;
use crate::request::ApiRequest;
use crate::tree::{handle_tree, TreeOptions};

// ---------- parameter configs ----------

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigVO {
    pub config_id: String,
    pub config_name: String,
    pub config_key: String,
    pub config_value: String,
    pub config_type: String,
    #[serde(default)]
    pub remark: Option<String>,
    #[serde(default)]
    pub create_time: Option<String>,
}

#[derive(Debug, Clone, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ConfigForm {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_id: Option<String>,
    pub config_name: String,
    pub config_key: String,
    pub config_value: String,
    pub config_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
}

#[derive(Debug, Clone, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ConfigQuery {
    #[serde(flatten)]
    pub page: PageQuery,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<DateRange>,
}

pub async fn list_configs(client: &Client, query: &ConfigQuery) -> Result<PageEnvelope<ConfigVO>> {
    client
        .send_page(ApiRequest::get("/system/config/list").params_from(query)?)
        .await
}

pub async fn get_config(client: &Client, config_id: &str) -> Result<Envelope<ConfigVO>> {
    client
        .send(ApiRequest::get(format!("/system/config/{config_id}")))
        .await
}

/// Look up a config value by key.
pub async fn get_config_by_key(client: &Client, config_key: &str) -> Result<Envelope<String>> {
    client
        .send(ApiRequest::get(format!("/system/config/configKey/{config_key}")))
        .await
}

pub async fn add_config(client: &Client, form: &ConfigForm) -> Result<Envelope<Value>> {
    client
        .send_unit(ApiRequest::post("/system/config").json(form)?)
        .await
}

pub async fn update_config(client: &Client, form: &ConfigForm) -> Result<Envelope<Value>> {
    client
        .send_unit(ApiRequest::put("/system/config").json(form)?)
        .await
}

pub async fn update_config_by_key(
    client: &Client,
    config_key: &str,
    config_value: &str,
) -> Result<Envelope<Value>> {
    client
        .send_unit(
            ApiRequest::put("/system/config/updateByKey")
                .json_value(json!({"configKey": config_key, "configValue": config_value})),
        )
        .await
}

pub async fn delete_configs(client: &Client, config_ids: &[&str]) -> Result<Envelope<Value>> {
    client
        .send_unit(ApiRequest::delete(format!(
            "/system/config/{}",
            config_ids.join(",")
        )))
        .await
}

pub async fn refresh_config_cache(client: &Client) -> Result<Envelope<Value>> {
    client
        .send_unit(ApiRequest::delete("/system/config/refreshCache"))
        .await
}

// ---------- data dictionaries ----------

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DictTypeVO {
    pub dict_id: String,
    pub dict_name: String,
    pub dict_type: String,
    #[serde(default)]
    pub remark: Option<String>,
    #[serde(default)]
    pub create_time: Option<String>,
}

#[derive(Debug, Clone, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DictTypeForm {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dict_id: Option<String>,
    pub dict_name: String,
    pub dict_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
}

#[derive(Debug, Clone, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DictTypeQuery {
    #[serde(flatten)]
    pub page: PageQuery,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dict_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dict_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<DateRange>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DictDataVO {
    pub dict_code: String,
    pub dict_label: String,
    pub dict_value: String,
    #[serde(default)]
    pub dict_sort: i64,
    #[serde(default)]
    pub css_class: Option<String>,
    #[serde(default)]
    pub list_class: Option<String>,
    #[serde(default)]
    pub remark: Option<String>,
}

pub async fn list_dict_types(
    client: &Client,
    query: &DictTypeQuery,
) -> Result<PageEnvelope<DictTypeVO>> {
    client
        .send_page(ApiRequest::get("/system/dict/type/list").params_from(query)?)
        .await
}

pub async fn get_dict_type(client: &Client, dict_id: &str) -> Result<Envelope<DictTypeVO>> {
    client
        .send(ApiRequest::get(format!("/system/dict/type/{dict_id}")))
        .await
}

pub async fn add_dict_type(client: &Client, form: &DictTypeForm) -> Result<Envelope<Value>> {
    client
        .send_unit(ApiRequest::post("/system/dict/type").json(form)?)
        .await
}

pub async fn update_dict_type(client: &Client, form: &DictTypeForm) -> Result<Envelope<Value>> {
    client
        .send_unit(ApiRequest::put("/system/dict/type").json(form)?)
        .await
}

pub async fn delete_dict_types(client: &Client, dict_ids: &[&str]) -> Result<Envelope<Value>> {
    client
        .send_unit(ApiRequest::delete(format!(
            "/system/dict/type/{}",
            dict_ids.join(",")
        )))
        .await
}

pub async fn refresh_dict_cache(client: &Client) -> Result<Envelope<Value>> {
    client
        .send_unit(ApiRequest::delete("/system/dict/type/refreshCache"))
        .await
}

/// All dict types, for selector widgets.
pub async fn dict_type_options(client: &Client) -> Result<Envelope<Vec<DictTypeVO>>> {
    client
        .send(ApiRequest::get("/system/dict/type/optionselect"))
        .await
}

/// Dictionary entries of one dict type.
pub async fn dict_data_by_type(
    client: &Client,
    dict_type: &str,
) -> Result<Envelope<Vec<DictDataVO>>> {
    client
        .send(ApiRequest::get(format!("/system/dict/data/type/{dict_type}")))
        .await
}

/// Project dict rows onto the label/value pairs the UI helpers consume.
pub fn to_dict_entries(rows: &[DictDataVO]) -> Vec<DictEntry> {
    rows.iter()
        .map(|r| DictEntry { label: r.dict_label.clone(), value: r.dict_value.clone() })
        .collect()
}

// ---------- menus ----------

#[derive(Debug, Clone, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct MenuForm {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub menu_id: Option<String>,
    pub menu_name: String,
    pub parent_id: String,
    pub order_num: i64,
    pub menu_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub perms: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Flat menu list as raw records, ready for tree assembly.
pub async fn list_menus(client: &Client) -> Result<Envelope<Vec<Value>>> {
    client.send(ApiRequest::get("/system/menu/list")).await
}

/// Menu list assembled into a forest keyed by `menuId`.
pub async fn menu_tree(client: &Client) -> Result<Vec<Value>> {
    let envelope = list_menus(client).await?;
    let records = envelope.into_data()?;
    let opts = TreeOptions { id_field: "menuId".into(), ..TreeOptions::default() };
    handle_tree(records, &opts)
}

pub async fn add_menu(client: &Client, form: &MenuForm) -> Result<Envelope<Value>> {
    client
        .send_unit(ApiRequest::post("/system/menu").json(form)?)
        .await
}

pub async fn update_menu(client: &Client, form: &MenuForm) -> Result<Envelope<Value>> {
    client
        .send_unit(ApiRequest::put("/system/menu").json(form)?)
        .await
}

pub async fn delete_menu(client: &Client, menu_id: &str) -> Result<Envelope<Value>> {
    client
        .send_unit(ApiRequest::delete(format!("/system/menu/{menu_id}")))
        .await
}

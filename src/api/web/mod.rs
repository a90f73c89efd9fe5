use std::collections::HashMap;

use axum::http::{
    header as HttpHeader, HeaderMap as HttpHeaderMap, HeaderValue as HttpHeaderValue,
    StatusCode as HttpStatusCode,
};
use axum::routing::{delete, get, patch, post, MethodRouter};
use serde::Serialize;

use crate::constant as AppConst;
use crate::constant::api::web as WebConst;
use crate::{AppSharedState, WebApiHdlrLabel};

pub mod dto;
mod inventory;
mod order_detail;

fn render<T: Serialize>(status: HttpStatusCode, body: &T) -> (HttpStatusCode, String) {
    match serde_json::to_string(body) {
        Ok(s) => (status, s),
        Err(_) => (
            HttpStatusCode::INTERNAL_SERVER_ERROR,
            r#"{"reason":"serialization-failure"}"#.to_string(),
        ),
    }
}

fn json_content_type() -> HttpHeaderMap {
    let resp_ctype_val = HttpHeaderValue::from_str(AppConst::HTTP_CONTENT_TYPE_JSON).unwrap();
    let mut hdr_map = HttpHeaderMap::new();
    hdr_map.insert(HttpHeader::CONTENT_TYPE, resp_ctype_val);
    hdr_map
}

pub type ApiRouteType = MethodRouter<AppSharedState>;
pub type ApiRouteTableType = HashMap<WebApiHdlrLabel, ApiRouteType>;

pub fn route_table() -> ApiRouteTableType {
    let mut out: ApiRouteTableType = HashMap::new();
    out.insert(
        WebConst::SAVE_ORDER_DETAIL,
        post(order_detail::save_handler),
    );
    out.insert(
        WebConst::DELETE_ORDER_DETAIL,
        delete(order_detail::delete_handler),
    );
    out.insert(
        WebConst::LIST_ORDER_DETAILS,
        get(order_detail::list_handler),
    );
    out.insert(WebConst::ADJUST_INVENTORY, patch(inventory::adjust_handler));
    out.insert(
        WebConst::RECORD_INVENTORY_MOVEMENT,
        post(inventory::record_movement_handler),
    );
    out.insert(WebConst::LIST_INVENTORY, get(inventory::list_handler));
    out
}

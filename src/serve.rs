//! The HTTP front door.
//!
//! A single-threaded `tiny_http` loop handling the one endpoint:
//!
//! - `POST /micropub` — JSON create/update/delete/undelete operations
//! - `GET /micropub?q=source&url=…` — decoded source of a post
//! - `GET /micropub?q=syndicate-to` — configured syndication targets
//!
//! Requests are handled start to finish on the accepting thread; the
//! overwrite-disabled write is the only guard against two clients racing
//! for the same slug. Errors answer with a Micropub-shaped JSON body
//! carrying a machine-readable code.

use crate::{
    config::Config,
    content::ContentError,
    hooks::HookRegistry,
    log,
    micropub::{MicropubRequest, RequestError},
    ops,
};
use anyhow::{Context, Result, anyhow};
use serde_json::json;
use std::{io::Read, net::SocketAddr, sync::Arc};
use tiny_http::{Header, Method, Request, Response, Server};

// ============================================================================
// Server Entry Point
// ============================================================================

/// Bind the endpoint and handle requests until Ctrl+C.
pub fn serve_endpoint(config: &Config, registry: &HookRegistry) -> Result<()> {
    let interface: std::net::IpAddr = config.serve.interface.parse()?;
    let addr = SocketAddr::new(interface, config.serve.port);

    let server =
        Server::http(addr).map_err(|err| anyhow!("Failed to bind {addr}: {err}"))?;
    let server = Arc::new(server);

    // Set up Ctrl+C handler for graceful shutdown
    let server_for_signal = Arc::clone(&server);
    ctrlc::set_handler(move || {
        log!("serve"; "shutting down...");
        server_for_signal.unblock();
    })
    .context("Failed to set Ctrl+C handler")?;

    log!("serve"; "micropub endpoint on http://{addr}/micropub");

    for request in server.incoming_requests() {
        if let Err(err) = handle_request(request, config, registry) {
            log!("serve"; "request error: {err:#}");
        }
    }

    Ok(())
}

// ============================================================================
// Request Handling
// ============================================================================

fn handle_request(
    mut request: Request,
    config: &Config,
    registry: &HookRegistry,
) -> Result<()> {
    let url = request.url().to_owned();
    let (path, query) = url.split_once('?').unwrap_or((url.as_str(), ""));

    if path.trim_end_matches('/') != "/micropub" {
        return respond_json(
            request,
            404,
            &json!({"error": "not_found", "error_description": "No such endpoint"}),
        );
    }

    match request.method() {
        Method::Get => handle_query(request, config, &parse_query(query)),
        Method::Post => {
            if !is_json(content_type(&request).as_deref()) {
                return respond_error_code(
                    request,
                    "invalid_request",
                    "Only JSON payloads are supported",
                );
            }
            let mut body = String::new();
            request.as_reader().read_to_string(&mut body)?;
            handle_operation(request, config, registry, &body)
        }
        _ => respond_json(
            request,
            405,
            &json!({"error": "invalid_request", "error_description": "Method not allowed"}),
        ),
    }
}

fn handle_query(
    request: Request,
    config: &Config,
    params: &[(String, String)],
) -> Result<()> {
    match param(params, "q").as_deref() {
        Some("source") => {
            let Some(url) = param(params, "url") else {
                return respond_error_code(
                    request,
                    "invalid_request",
                    "`q=source` requires a url",
                );
            };
            let names: Vec<String> = params
                .iter()
                .filter(|(name, _)| name == "properties" || name == "properties[]")
                .map(|(_, value)| value.clone())
                .collect();

            match ops::source(config, &url, &names) {
                Ok(properties) => {
                    respond_json(request, 200, &json!({"properties": properties}))
                }
                Err(err) => respond_content_error(request, &err),
            }
        }
        Some("syndicate-to") => respond_json(
            request,
            200,
            &json!({"syndicate-to": config.syndication.target_names()}),
        ),
        _ => respond_error_code(request, "invalid_request", "Unsupported query"),
    }
}

fn handle_operation(
    request: Request,
    config: &Config,
    registry: &HookRegistry,
    body: &str,
) -> Result<()> {
    let operation = match MicropubRequest::from_json(body) {
        Ok(operation) => operation,
        Err(err) => return respond_request_error(request, &err),
    };

    match operation {
        MicropubRequest::Create(create) => {
            // uploaded media would arrive through a media endpoint; JSON
            // creations carry their photos in the property set already
            match ops::create(config, registry, create, &[]) {
                Ok(created) => {
                    log!("serve"; "created {}", created.url);
                    respond_created(request, &created.url)
                }
                Err(err) => respond_content_error(request, &err),
            }
        }
        MicropubRequest::Update { url, update } => {
            finish(request, ops::update(config, &url, &update), "updated", &url)
        }
        MicropubRequest::Delete { url } => {
            finish(request, ops::delete(config, &url), "deleted", &url)
        }
        MicropubRequest::Undelete { url } => {
            finish(request, ops::undelete(config, &url), "undeleted", &url)
        }
    }
}

fn finish(
    request: Request,
    result: Result<(), ContentError>,
    verb: &str,
    url: &str,
) -> Result<()> {
    match result {
        Ok(()) => {
            log!("serve"; "{verb} {url}");
            respond_no_content(request)
        }
        Err(err) => respond_content_error(request, &err),
    }
}

// ============================================================================
// Query Parsing
// ============================================================================

/// Decode `a=1&b=2` into pairs. Keys without `=` get an empty value.
fn parse_query(query: &str) -> Vec<(String, String)> {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode(name), decode(value))
        })
        .collect()
}

fn decode(text: &str) -> String {
    urlencoding::decode(text)
        .map(std::borrow::Cow::into_owned)
        .unwrap_or_else(|_| text.to_owned())
}

fn param(params: &[(String, String)], name: &str) -> Option<String> {
    params
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.clone())
}

fn content_type(request: &Request) -> Option<String> {
    request
        .headers()
        .iter()
        .find(|header| header.field.equiv("Content-Type"))
        .map(|header| header.value.as_str().to_owned())
}

/// An absent Content-Type is accepted; anything explicit must be JSON.
fn is_json(content_type: Option<&str>) -> bool {
    content_type.is_none_or(|value| value.trim_start().starts_with("application/json"))
}

// ============================================================================
// Response Helpers
// ============================================================================

fn respond_json(request: Request, status: u16, body: &serde_json::Value) -> Result<()> {
    let response = Response::from_string(serde_json::to_string(body)?)
        .with_status_code(status)
        .with_header(
            Header::from_bytes("Content-Type", "application/json; charset=utf-8").unwrap(),
        );
    request.respond(response)?;
    Ok(())
}

fn respond_created(request: Request, url: &str) -> Result<()> {
    let response =
        Response::empty(201).with_header(Header::from_bytes("Location", url).unwrap());
    request.respond(response)?;
    Ok(())
}

fn respond_no_content(request: Request) -> Result<()> {
    request.respond(Response::empty(204))?;
    Ok(())
}

fn respond_error_code(request: Request, code: &str, description: &str) -> Result<()> {
    respond_json(
        request,
        400,
        &json!({"error": code, "error_description": description}),
    )
}

fn respond_content_error(request: Request, err: &ContentError) -> Result<()> {
    log!("error"; "{err:#}");
    respond_json(
        request,
        400,
        &json!({"error": err.code(), "error_description": err.to_string()}),
    )
}

fn respond_request_error(request: Request, err: &RequestError) -> Result<()> {
    respond_json(
        request,
        400,
        &json!({"error": "invalid_request", "error_description": err.to_string()}),
    )
}

// ============================================================================
// Tests
// ============================================================================

//! Index page handler.
//!
//! Serves a self-contained HTML page with inline CSS/JS. The script loads
//! today's record for a member and posts new ratings back to `API_URL`.

use crate::day::{day_key, day_readable};
use crate::routes::AppState;
use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use std::sync::Arc;

const RATINGS: [(&str, &str); 7] = [
    ("sleep", "Sleep"),
    ("energy", "Energy"),
    ("intellect", "Intellect"),
    ("serenity", "Serenity"),
    ("family", "Family"),
    ("social", "Social"),
    ("work", "Work"),
];

pub async fn index(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let today = state.service.today();
    // JSON string literal doubles as a JS literal; "</" would close the script tag.
    let api_url_js = serde_json::Value::String(state.api_url.clone())
        .to_string()
        .replace("</", "<\\/");

    let mut rating_rows = String::new();
    for (field, label) in RATINGS {
        rating_rows.push_str(&format!(
            "<label class=\"rating\"><span>{label}</span><input type=\"number\" name=\"{field}\" value=\"0\"></label>\n"
        ));
    }

    let html = format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Daily Check</title>
<link rel="icon" href="/web/public/images/favicon.ico">
<style>
  * {{ margin: 0; padding: 0; box-sizing: border-box; }}
  body {{ font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; background: #0f1117; color: #e0e0e0; padding: 20px; max-width: 480px; margin: 0 auto; }}
  h1 {{ color: #58a6ff; margin-bottom: 8px; }}
  .meta {{ color: #8b949e; font-size: 0.85em; margin-bottom: 20px; }}
  .rating {{ display: flex; justify-content: space-between; align-items: center; background: #161b22; border: 1px solid #30363d; border-radius: 8px; padding: 10px 16px; margin-bottom: 8px; }}
  input {{ background: #0d1117; color: #e0e0e0; border: 1px solid #30363d; border-radius: 4px; padding: 6px 8px; width: 80px; }}
  #member {{ width: 100%; margin-bottom: 16px; }}
  button {{ background: #238636; color: #fff; border: 0; border-radius: 6px; padding: 10px 16px; cursor: pointer; width: 100%; margin-top: 8px; }}
  #status {{ color: #8b949e; font-size: 0.85em; margin-top: 12px; min-height: 1em; }}
</style>
</head>
<body>
  <h1>Daily Check</h1>
  <p class="meta">{today_readable} &middot; {api_url}</p>

  <input id="member" placeholder="Member ID">
  <form id="day">
    {rating_rows}
    <button type="submit">Save</button>
  </form>
  <p id="status"></p>

  <script>
    const API_URL = {api_url_js}.replace(/\/+$/, "");
    const TODAY = "{today_key}";
    const form = document.getElementById("day");
    const member = document.getElementById("member");
    const status = document.getElementById("status");

    function memberUrl() {{
      return API_URL + "/member/" + encodeURIComponent(member.value.trim()) + "/day";
    }}

    async function load() {{
      if (!member.value.trim()) return;
      localStorage.setItem("member", member.value.trim());
      const res = await fetch(memberUrl() + "/" + TODAY);
      const body = await res.json();
      if (!res.ok) {{ status.textContent = body.error; return; }}
      for (const input of form.querySelectorAll("input")) input.value = body[input.name] || 0;
      status.textContent = "";
    }}

    form.addEventListener("submit", async (e) => {{
      e.preventDefault();
      const payload = {{}};
      for (const input of form.querySelectorAll("input")) payload[input.name] = parseInt(input.value, 10) || 0;
      const res = await fetch(memberUrl(), {{
        method: "POST",
        headers: {{ "Content-Type": "application/json" }},
        body: JSON.stringify(payload),
      }});
      const body = await res.json();
      status.textContent = res.ok ? "Saved " + body.day : body.error;
    }});

    member.value = localStorage.getItem("member") || "";
    member.addEventListener("change", load);
    load();
  </script>
</body>
</html>"#,
        today_readable = day_readable(today),
        today_key = day_key(today),
        api_url = escape_html(&state.api_url),
        api_url_js = api_url_js,
        rating_rows = rating_rows,
    );

    ([(header::CONTENT_TYPE, "text/html; charset=utf-8")], html)
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

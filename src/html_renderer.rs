use crate::security::CsrfToken;
use crate::types::FolderEntry;

/// Renders the complete admin page. Pure function of its inputs: the
/// caller decides where the markup goes.
#[must_use]
pub fn render_page(entries: &[FolderEntry], action_url: &str, csrf: &CsrfToken) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
    html.push_str("  <meta charset=\"UTF-8\">\n");
    html.push_str("  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    html.push_str("  <title>Module Folder Cleaner</title>\n");
    html.push_str(&render_styles());
    html.push_str("</head>\n<body>\n");

    html.push_str("  <h1>Module Folder Cleaner</h1>\n");
    html.push_str(&render_folder_list(entries, action_url, csrf));

    html.push_str("</body>\n</html>\n");
    html
}

/// Renders just the listing fragment: a success notice when there is
/// nothing to clean, otherwise the selectable folder table.
#[must_use]
pub fn render_folder_list(
    entries: &[FolderEntry],
    action_url: &str,
    csrf: &CsrfToken,
) -> String {
    if entries.is_empty() {
        return render_empty_notice();
    }
    render_folder_table(entries, action_url, csrf)
}

fn render_empty_notice() -> String {
    "<div class=\"notice success\"><p>No orphaned module folders found.</p></div>\n".to_string()
}

fn render_folder_table(entries: &[FolderEntry], action_url: &str, csrf: &CsrfToken) -> String {
    let mut html = String::new();

    html.push_str("<div class=\"card\">\n");
    html.push_str("  <h3>Delete Module Folders</h3>\n");

    html.push_str(&format!(
        "  <form id=\"cleaner-form\" action=\"{}\" method=\"POST\">\n",
        escape_html(action_url)
    ));
    html.push_str(&format!(
        "    <input type=\"hidden\" name=\"{}\" value=\"{}\">\n",
        escape_html(&csrf.name),
        escape_html(&csrf.value)
    ));

    html.push_str("    <table class=\"folder-table\">\n");
    html.push_str("      <thead>\n        <tr>\n");
    html.push_str(
        "          <th class=\"shrink\"><input type=\"checkbox\" id=\"select-all\" onchange=\"toggleAll(this)\"></th>\n",
    );
    html.push_str("          <th>Directory Name</th>\n");
    html.push_str("          <th>Last Modified</th>\n");
    html.push_str("        </tr>\n      </thead>\n      <tbody>\n");

    for entry in entries {
        let name = escape_html(&entry.name);
        html.push_str(&format!(
            "        <tr>\n          <td><input type=\"checkbox\" name=\"folders[]\" value=\"{}\" onchange=\"syncSelection()\"></td>\n          <td><span class=\"folder-name\">{}</span></td>\n          <td class=\"muted\">{}</td>\n        </tr>\n",
            name,
            name,
            entry.modified.format("%Y-%m-%d %H:%M")
        ));
    }

    html.push_str("      </tbody>\n    </table>\n");

    html.push_str(
        "    <button type=\"submit\" id=\"delete-button\" class=\"danger\" disabled onclick=\"return confirm('Are you sure you want to permanently delete the selected folders?')\">Delete Selected (<span id=\"selected-count\">0</span>)</button>\n",
    );
    html.push_str("  </form>\n");
    html.push_str("</div>\n");
    html.push_str(&render_script());

    html
}

fn render_styles() -> String {
    r#"  <style>
    body { background-color: #f4f4f5; color: #222; font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, Helvetica, Arial, sans-serif; padding: 20px; margin: 0; }
    h1 { font-size: 1.6em; margin-bottom: 20px; }
    .card { background: #fff; border: 1px solid #ddd; border-radius: 8px; padding: 20px; max-width: 760px; box-shadow: 0 2px 8px rgba(0,0,0,0.06); }
    .notice.success { background: #edfbf0; border-left: 4px solid #32d296; padding: 10px 15px; max-width: 760px; }
    .folder-table { width: 100%; border-collapse: collapse; margin: 15px 0; }
    .folder-table th { text-align: left; padding: 8px; border-bottom: 2px solid #ddd; }
    .folder-table td { padding: 8px; border-bottom: 1px solid #eee; }
    .folder-table .shrink { width: 1%; }
    .folder-name { color: #c0392b; font-weight: bold; font-family: ui-monospace, monospace; }
    .muted { color: #888; font-size: 0.9em; }
    button.danger { background: #c0392b; color: #fff; border: none; border-radius: 4px; padding: 10px 18px; cursor: pointer; }
    button.danger:disabled { background: #ccc; cursor: not-allowed; }
  </style>
"#
    .to_string()
}

fn render_script() -> String {
    r#"<script>
function rowBoxes() {
  return Array.from(document.querySelectorAll('input[name="folders[]"]'));
}
function syncSelection() {
  var boxes = rowBoxes();
  var selected = boxes.filter(function (b) { return b.checked; }).length;
  document.getElementById('selected-count').textContent = selected;
  document.getElementById('delete-button').disabled = selected === 0;
  document.getElementById('select-all').checked = selected === boxes.length;
}
function toggleAll(master) {
  rowBoxes().forEach(function (b) { b.checked = master.checked; });
  syncSelection();
}
</script>
"#
    .to_string()
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

//! The single-page UI, embedded directly in the binary for easy deployment.

use ontox_core::dataset::OntologyRecord;

/// CSS styles for the page.
const CSS: &str = r#"
* {
    margin: 0;
    padding: 0;
    box-sizing: border-box;
}

body {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, 'Helvetica Neue', Arial, sans-serif;
    background: #0f172a;
    color: #f1f5f9;
    line-height: 1.6;
}

.container {
    max-width: 1400px;
    margin: 0 auto;
    padding: 20px;
}

h1 {
    margin-bottom: 20px;
}

table {
    width: 100%;
    border-collapse: collapse;
    margin-bottom: 10px;
    font-size: 0.9rem;
}

th, td {
    border: 1px solid #475569;
    padding: 6px 10px;
    text-align: left;
    overflow-wrap: anywhere;
}

th {
    background: #1e293b;
}

.note {
    color: #94a3b8;
    margin-bottom: 20px;
}

.info {
    background: #1e293b;
    border-left: 4px solid #3b82f6;
    padding: 10px 15px;
    margin-bottom: 15px;
}

textarea {
    width: 100%;
    min-height: 80px;
    background: #1e293b;
    color: #f1f5f9;
    border: 1px solid #475569;
    border-radius: 4px;
    padding: 10px;
    font-size: 1rem;
    margin-bottom: 15px;
}

button {
    background: #3b82f6;
    color: #f1f5f9;
    border: none;
    border-radius: 4px;
    padding: 10px 20px;
    font-size: 1rem;
    cursor: pointer;
}

button:hover {
    background: #2563eb;
}

button:disabled {
    background: #475569;
    cursor: wait;
}

#result {
    margin-top: 20px;
}

.warning {
    background: #1e293b;
    border-left: 4px solid #eab308;
    padding: 10px 15px;
    margin-bottom: 15px;
}

.error {
    background: #1e293b;
    border-left: 4px solid #ef4444;
    padding: 10px 15px;
    margin-bottom: 15px;
}

pre {
    background: #1e293b;
    border: 1px solid #475569;
    border-radius: 4px;
    padding: 15px;
    overflow-x: auto;
    white-space: pre-wrap;
}
"#;

/// Client-side logic for the query flow.
const SCRIPT: &str = r#"
const button = document.getElementById('submit');
const queryBox = document.getElementById('query');
const result = document.getElementById('result');

button.addEventListener('click', async () => {
    const query = queryBox.value.trim();
    if (!query) {
        return;
    }
    button.disabled = true;
    result.innerHTML = '';

    const echo = document.createElement('div');
    echo.className = 'info';
    echo.textContent = 'Your Query: ' + query;
    result.appendChild(echo);

    try {
        const response = await fetch('/api/ancestors', {
            method: 'POST',
            headers: { 'Content-Type': 'application/json' },
            body: JSON.stringify({ query }),
        });
        if (!response.ok) {
            throw new Error('HTTP ' + response.status);
        }
        const body = await response.json();
        if (body.warning) {
            const warning = document.createElement('div');
            warning.className = 'warning';
            warning.textContent = body.warning;
            result.appendChild(warning);
        }
        const output = document.createElement('pre');
        output.textContent = body.ancestors !== undefined && body.ancestors !== null
            ? JSON.stringify(body.ancestors, null, 2)
            : body.raw;
        result.appendChild(output);
    } catch (err) {
        const error = document.createElement('div');
        error.className = 'error';
        error.textContent = 'Query failed: ' + err.message;
        result.appendChild(error);
    } finally {
        button.disabled = false;
    }
});
"#;

fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn preview_table(records: &[OntologyRecord]) -> String {
    let mut rows = String::new();
    for record in records {
        rows.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            escape_html(&record.class_id),
            escape_html(&record.preferred_label),
            escape_html(&record.parents.join("|")),
            record.obsolete,
        ));
    }
    format!(
        "<table>\n<tr><th>Class ID</th><th>Preferred Label</th><th>Parents</th><th>Obsolete</th></tr>\n{rows}</table>"
    )
}

/// Render the full page with the dataset preview baked in.
pub fn render(preview: &[OntologyRecord], total_records: usize) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Onto-X llm</title>
<style>{css}</style>
</head>
<body>
<div class="container">
<h1>Onto-X llm</h1>
{table}
<p class="note">Showing the first {shown} of {total} records.</p>
<div class="info">Enter the Preferred Label of the entity you want to analyze</div>
<textarea id="query" placeholder="Query"></textarea>
<br>
<button id="submit">Get Ancestors</button>
<div id="result"></div>
</div>
<script>{script}</script>
</body>
</html>
"#,
        css = CSS,
        table = preview_table(preview),
        shown = preview.len(),
        total = total_records,
        script = SCRIPT,
    )
}

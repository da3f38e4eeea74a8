//! Intake form page — one numeric input per panel parameter, a compute
//! trigger, and a textual result region.
//!
//! The page only orchestrates: validation semantics live in the API, and
//! chart rendering is left to the external charting layer, which consumes
//! the ranked series returned by /api/predict.

use axum::response::Html;

use leukodx_common::ranges::{REFERENCE_RANGES, WBC_FLOOR_FIELD};

/// GET /
pub async fn form_page() -> Html<String> {
    Html(render_form_page())
}

fn render_form_page() -> String {
    let mut rows = String::new();
    for spec in &REFERENCE_RANGES {
        let hint = if spec.name == WBC_FLOOR_FIELD {
            " (≥ 50 required)"
        } else {
            ""
        };
        rows.push_str(&format!(
            r#"        <div class="input-group">
            <label for="{name}">{name}{hint}</label>
            <input type="number" step="any" id="{name}" data-field="{name}">
            <span class="unit">{unit}</span>
            <span class="issue" id="issue-{name}"></span>
        </div>
"#,
            name = spec.name,
            unit = spec.unit,
            hint = hint,
        ));
    }

    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>Leukodx — Leukocytosis Decision Support</title>
    <style>
        body {{ font-family: sans-serif; max-width: 760px; margin: 2rem auto; color: #2c3e50; }}
        .input-group {{ display: flex; align-items: center; gap: 0.5rem; margin-bottom: 0.4rem; }}
        .input-group label {{ width: 10rem; }}
        .input-group input.invalid {{ border: 2px solid #e74c3c; }}
        .input-group input.abnormal {{ background: #fdf3e7; }}
        .unit {{ color: #7f8c8d; font-size: 0.85rem; }}
        .issue {{ color: #e74c3c; font-size: 0.8rem; }}
        .score-high {{ color: #e74c3c; font-weight: 700; }}
        .score-low {{ color: #27ae60; font-weight: 700; }}
        #plot {{ min-height: 2rem; color: #7f8c8d; }}
    </style>
</head>
<body>
    <h1>Leukodx</h1>
    <p>Differential of marked leukocytosis: myeloid malignancy vs. leukemoid reaction.</p>

    <form id="panel">
{rows}    </form>

    <button id="computeButton" disabled>Loading…</button>

    <h2>Result</h2>
    <div>Score: <span id="predictionScore">-</span></div>
    <div>Diagnosis: <span id="diagnosisResult">-</span></div>
    <div id="keyFindings"></div>
    <div id="plot" data-series="">Ranked series are attached to this node for the charting layer.</div>

    <script>
        const button = document.getElementById('computeButton');

        async function refreshStatus() {{
            try {{
                const status = await (await fetch('/api/status')).json();
                if (status.ready) {{
                    button.disabled = false;
                    button.textContent = 'Compute Prediction';
                }} else {{
                    button.disabled = true;
                    button.textContent = 'Initialization Failed';
                    document.getElementById('diagnosisResult').textContent = status.error || 'Not ready';
                }}
            }} catch (e) {{
                button.disabled = true;
                button.textContent = 'Initialization Failed';
            }}
        }}

        function collectFields() {{
            const fields = {{}};
            for (const input of document.querySelectorAll('#panel input[data-field]')) {{
                fields[input.dataset.field] = input.value;
            }}
            return fields;
        }}

        function clearMarks() {{
            for (const input of document.querySelectorAll('#panel input[data-field]')) {{
                input.classList.remove('invalid', 'abnormal');
                document.getElementById('issue-' + input.dataset.field).textContent = '';
            }}
        }}

        button.addEventListener('click', async () => {{
            button.disabled = true;
            clearMarks();
            try {{
                const resp = await fetch('/api/predict', {{
                    method: 'POST',
                    headers: {{ 'Content-Type': 'application/json' }},
                    body: JSON.stringify({{ fields: collectFields() }}),
                }});
                const body = await resp.json();
                if (!resp.ok) {{
                    document.getElementById('predictionScore').textContent = 'Error';
                    document.getElementById('diagnosisResult').textContent = body.error;
                    for (const issue of (body.details && body.details.issues) || []) {{
                        const input = document.getElementById(issue.field);
                        if (input) input.classList.add('invalid');
                        document.getElementById('issue-' + issue.field).textContent = issue.message;
                    }}
                    return;
                }}
                const cls = body.diagnosis === 'myeloid_malignancy' ? 'score-high' : 'score-low';
                const score = document.getElementById('predictionScore');
                const diagnosis = document.getElementById('diagnosisResult');
                score.textContent = body.probability.toFixed(3);
                score.className = cls;
                diagnosis.textContent = body.diagnosis_text;
                diagnosis.className = cls;
                for (const finding of body.findings || []) {{
                    const input = document.getElementById(finding.name);
                    if (input) input.classList.add('abnormal');
                }}
                document.getElementById('plot').dataset.series = JSON.stringify(body.plot);
            }} finally {{
                button.disabled = false;
            }}
        }});

        refreshStatus();
    </script>
</body>
</html>"##,
        rows = rows,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_lists_every_parameter() {
        let page = render_form_page();
        for spec in &REFERENCE_RANGES {
            assert!(page.contains(&format!("id=\"{}\"", spec.name)), "missing input for {}", spec.name);
        }
    }

    #[test]
    fn test_trigger_starts_disabled() {
        let page = render_form_page();
        assert!(page.contains(r#"<button id="computeButton" disabled>"#));
    }
}

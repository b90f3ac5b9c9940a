use std::sync::Arc;

/// Placeholders in [`PAGE_TEMPLATE`], substituted once at render time.
const HEADING: &str = "%HEADING%";
const IMAGE_PATH: &str = "%IMAGE_PATH%";
const REFRESH_MS: &str = "%REFRESH_MS%";

const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>%HEADING%</title>
    <style>
        body {
            margin: 0;
            background: #1a1a1a;
            display: flex;
            justify-content: center;
            align-items: center;
            height: 100vh;
            font-family: 'Segoe UI', Arial, sans-serif;
            overflow: hidden;
        }
        #frame {
            max-width: 95vw;
            max-height: 95vh;
            border: 3px solid #4caf50;
            border-radius: 8px;
            box-shadow: 0 0 20px rgba(76, 175, 80, 0.3);
        }
        .info {
            position: absolute;
            top: 20px;
            left: 20px;
            color: #4caf50;
            background: rgba(0, 0, 0, 0.8);
            padding: 15px;
            border-radius: 8px;
            border: 1px solid #4caf50;
        }
        .status {
            color: #81c784;
            margin-top: 5px;
        }
        .loading {
            position: absolute;
            top: 50%;
            left: 50%;
            transform: translate(-50%, -50%);
            color: #4caf50;
            font-size: 18px;
        }
    </style>
</head>
<body>
    <div class="info">
        <h3 style="margin: 0 0 10px 0;">%HEADING%</h3>
        <div class="status">Status: <span id="status">connecting</span></div>
        <div class="status">Refresh: every %REFRESH_MS% ms</div>
    </div>

    <div class="loading" id="loading">Loading...</div>
    <img id="frame" data-src="%IMAGE_PATH%" alt="%HEADING%" style="display: none;">

    <script>
        const img = document.getElementById('frame');
        const loading = document.getElementById('loading');
        const status = document.getElementById('status');
        const source = img.dataset.src;
        let shown = false;

        function refresh() {
            const next = new Image();
            next.onload = function () {
                img.src = next.src;
                status.textContent = 'live';
                if (!shown) {
                    loading.style.display = 'none';
                    img.style.display = 'block';
                    shown = true;
                }
            };
            next.onerror = function () {
                status.textContent = 'waiting for first frame';
            };
            next.src = source + '?' + Date.now();
        }

        refresh();
        setInterval(refresh, %REFRESH_MS%);
    </script>
</body>
</html>
"#;

/// The HTML viewer served for every non-image path.
///
/// Rendered once; handlers share the same [`Arc<str>`].
#[derive(Debug, Clone)]
pub struct ControlPage {
    html: Arc<str>,
}

impl ControlPage {
    pub fn render(heading: &str, image_path: &str, refresh_ms: u64) -> Self {
        let html = PAGE_TEMPLATE
            .replace(HEADING, &escape_html(heading))
            .replace(IMAGE_PATH, &escape_html(image_path))
            .replace(REFRESH_MS, &refresh_ms.to_string());
        Self {
            html: Arc::from(html),
        }
    }

    pub fn html(&self) -> Arc<str> {
        self.html.clone()
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            '%' => escaped.push_str("&#37;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

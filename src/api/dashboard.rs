//! Static dashboard page served by the serverless variant.

/// Dashboard HTML. Links the advertised endpoints; issues no API calls.
pub const PAGE: &str = r#"<!DOCTYPE html>
<html lang="pt-BR">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Finanças Enterprise PRO</title>
    <style>
        body { font-family: system-ui, sans-serif; background: #1e1b4b; color: #fff; margin: 0; padding: 2rem; }
        .card { background: rgba(255,255,255,0.1); border: 1px solid rgba(255,255,255,0.2); border-radius: 1rem; padding: 2rem; max-width: 48rem; margin: 0 auto; }
        .live-dot { background: #10b981; border-radius: 50%; height: 12px; width: 12px; display: inline-block; margin-right: 0.5rem; }
        a { color: #93c5fd; }
    </style>
</head>
<body>
    <div class="card">
        <h1><span class="live-dot"></span>Finanças Enterprise PRO</h1>
        <p>API funcionando!</p>
        <ul>
            <li><a href="/">/</a></li>
            <li><a href="/health">/health</a></li>
            <li><a href="/openapi.json">/openapi.json</a></li>
        </ul>
    </div>
</body>
</html>
"#;

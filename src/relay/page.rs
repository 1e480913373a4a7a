//! Chat page shell served at `/`.

/// Single-page chat UI. Posts the `message` form field to `/call_llm`
/// and appends the returned HTML fragment.
pub const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="zh-Hant">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Tripmate</title>
<style>
  body { font-family: system-ui, sans-serif; max-width: 760px; margin: 0 auto; padding: 16px; background: #fafafa; }
  #chat { display: flex; flex-direction: column; gap: 8px; margin-bottom: 80px; }
  .user { align-self: flex-end; background: #1976d2; color: #fff; padding: 8px 12px; border-radius: 12px; max-width: 80%; white-space: pre-wrap; }
  .agent { align-self: flex-start; background: #fff; padding: 8px 12px; border-radius: 12px; max-width: 90%; box-shadow: 0 1px 2px rgba(0,0,0,.1); }
  .message-text p { margin: 4px 0; }
  form { position: fixed; bottom: 0; left: 0; right: 0; display: flex; gap: 8px; padding: 12px; background: #fff; border-top: 1px solid #ddd; }
  input[name=message] { flex: 1; padding: 8px; font-size: 1em; }
</style>
</head>
<body>
<h1>🧳 Tripmate</h1>
<div id="chat"></div>
<form id="chat-form">
  <input name="message" autocomplete="off" placeholder="想去哪裡玩？" autofocus>
  <button type="submit">送出</button>
</form>
<script>
const form = document.getElementById('chat-form');
const chat = document.getElementById('chat');

function bubble(cls, html, isText) {
  const div = document.createElement('div');
  div.className = cls;
  if (isText) { div.textContent = html; } else { div.innerHTML = html; }
  chat.appendChild(div);
  window.scrollTo(0, document.body.scrollHeight);
  return div;
}

form.addEventListener('submit', async (event) => {
  event.preventDefault();
  const data = new FormData(form);
  const text = data.get('message') || '';
  if (!text.trim()) return;
  bubble('user', text, true);
  form.reset();
  const pending = bubble('agent', '…', true);
  try {
    const response = await fetch('/call_llm', { method: 'POST', body: new URLSearchParams(data) });
    pending.innerHTML = await response.text();
  } catch (err) {
    pending.textContent = '⚠️ ' + err;
  }
});
</script>
</body>
</html>
"#;

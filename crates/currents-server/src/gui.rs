//! Browser editing page served at [`GUI_ROUTE`](crate::server::GUI_ROUTE).

/// Single-page entry editor. Talks to the JSON API under `/__currents/api`.
pub const EDITOR_HTML: &str = r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width,initial-scale=1">
  <title>Currents editor (dev)</title>
  <style>
    :root { color-scheme: light dark; }
    body { font: 14px/1.35 system-ui, sans-serif; margin: 16px auto; max-width: 1100px; padding: 0 16px; }
    h1 { font-size: 15px; letter-spacing: .12em; text-transform: uppercase; margin: 0 0 12px; }
    .layout { display: grid; grid-template-columns: 300px 1fr; gap: 16px; align-items: start; }
    .panel { border: 1px solid rgba(127,127,127,.35); border-radius: 10px; padding: 12px; }
    .pair { display: grid; grid-template-columns: 1fr 1fr; gap: 10px; }
    label { display: block; font-size: 12px; opacity: .85; margin: 10px 0 4px; }
    input, textarea { width: 100%; box-sizing: border-box; padding: 7px; border-radius: 8px; border: 1px solid rgba(127,127,127,.35); background: transparent; color: inherit; }
    textarea { min-height: 280px; resize: vertical; font-family: ui-monospace, monospace; }
    button { padding: 7px 10px; border-radius: 8px; border: 1px solid rgba(127,127,127,.35); background: transparent; color: inherit; cursor: pointer; }
    ul { list-style: none; padding: 0; margin: 8px 0 0; }
    li { padding: 7px; border-radius: 8px; cursor: pointer; border: 1px solid transparent; }
    li:hover { border-color: rgba(127,127,127,.35); }
    li.selected { border-color: rgba(127,127,127,.7); }
    .meta, #message { font-size: 12px; opacity: .8; }
    .actions { display: flex; gap: 8px; margin-top: 12px; }
  </style>
</head>
<body>
  <h1>Currents editor (dev only)</h1>
  <div class="layout">
    <section class="panel">
      <div class="actions" style="margin-top:0">
        <strong style="flex:1">Entries</strong>
        <button id="refresh" type="button">Refresh</button>
      </div>
      <ul id="entries"></ul>
    </section>

    <section class="panel">
      <div class="pair">
        <div><label for="date">Date</label><input id="date" type="date"></div>
        <div><label for="status">Status</label><input id="status" type="text" placeholder="active"></div>
      </div>
      <label for="title">Title</label><input id="title" type="text">
      <label for="tags">Tags (comma-separated)</label><input id="tags" type="text">
      <div class="pair">
        <div><label for="url_1">URL 1 (top)</label><input id="url_1" type="text"></div>
        <div><label for="url_2">URL 2 (bottom)</label><input id="url_2" type="text"></div>
      </div>
      <label for="url_3">URL 3</label><input id="url_3" type="text">
      <div class="pair">
        <div><label for="image_top">Image (top)</label><input id="image_top" type="text"></div>
        <div><label for="image_bottom">Image (bottom)</label><input id="image_bottom" type="text"></div>
      </div>
      <label for="image_alt">Image alt</label><input id="image_alt" type="text">
      <div class="pair">
        <div><label for="audio_top">Audio (top)</label><input id="audio_top" type="text"></div>
        <div><label for="audio_bottom">Audio (bottom)</label><input id="audio_bottom" type="text"></div>
      </div>
      <label for="audio_caption">Audio caption</label><input id="audio_caption" type="text">
      <label for="body">Body (markdown)</label><textarea id="body" spellcheck="false"></textarea>

      <div class="actions">
        <button id="new" type="button">New</button>
        <button id="create" type="button">Create</button>
        <button id="save" type="button">Save</button>
      </div>
      <p id="message"></p>
    </section>
  </div>

<script>
(function () {
  'use strict';

  const API = '/__currents/api';
  const TEXT_FIELDS = ['date', 'title', 'status', 'url_1', 'url_2', 'url_3', 'image_top',
    'image_bottom', 'image_alt', 'audio_top', 'audio_bottom', 'audio_caption'];
  const $ = (id) => document.getElementById(id);

  let currentFile = null;
  let currentId = null;

  const say = (text) => { $('message').textContent = text || ''; };

  const today = () => new Date().toISOString().slice(0, 10);

  function reset() {
    currentFile = null;
    currentId = null;
    TEXT_FIELDS.forEach((k) => { $(k).value = ''; });
    $('date').value = today();
    $('status').value = 'active';
    $('tags').value = '';
    $('body').value = '';
    document.querySelectorAll('#entries li').forEach((li) => li.classList.remove('selected'));
    say('New entry (not saved).');
  }

  function collect() {
    const data = { id: currentId, tags: $('tags').value.split(',').map((s) => s.trim()).filter(Boolean) };
    TEXT_FIELDS.forEach((k) => { data[k] = $(k).value; });
    data.status = (data.status || 'active').trim();
    return { file: currentFile, data, body: $('body').value };
  }

  async function call(path, payload) {
    const res = await fetch(API + path, payload === undefined ? {} : {
      method: 'POST',
      headers: { 'content-type': 'application/json' },
      body: JSON.stringify(payload),
    });
    const out = await res.json();
    if (!res.ok) throw new Error(out.error || 'Request failed');
    return out;
  }

  async function open(file, li) {
    const entry = await call('/read?file=' + encodeURIComponent(file));
    currentFile = entry.file;
    currentId = entry.data.id || entry.file.replace(/\.md$/, '');
    TEXT_FIELDS.forEach((k) => { $(k).value = entry.data[k] || ''; });
    $('status').value = entry.data.status || 'active';
    $('tags').value = (entry.data.tags || []).join(', ');
    $('body').value = entry.body || '';
    document.querySelectorAll('#entries li').forEach((x) => x.classList.toggle('selected', x === li));
    say('Loaded ' + entry.file);
  }

  async function refresh() {
    const items = await call('/list');
    const list = $('entries');
    list.innerHTML = '';
    items.forEach((item) => {
      const li = document.createElement('li');
      const name = document.createElement('strong');
      name.textContent = item.title || item.file;
      const meta = document.createElement('div');
      meta.className = 'meta';
      meta.textContent = (item.date || '') + ' · ' + item.status;
      li.append(name, meta);
      li.addEventListener('click', () => open(item.file, li).catch((e) => say(e.message)));
      list.appendChild(li);
    });
  }

  $('refresh').addEventListener('click', () => refresh().catch((e) => say(e.message)));
  $('new').addEventListener('click', reset);

  $('create').addEventListener('click', async () => {
    try {
      const out = await call('/create', collect());
      currentFile = out.file;
      currentId = out.id;
      say('Created ' + out.file);
      await refresh();
    } catch (e) { say(e.message); }
  });

  $('save').addEventListener('click', async () => {
    if (!currentFile) return say('Nothing loaded. Create the entry first.');
    try {
      const out = await call('/save', collect());
      say('Saved ' + out.file);
      await refresh();
    } catch (e) { say(e.message); }
  });

  reset();
  refresh().catch((e) => say(e.message));
})();
</script>
</body>
</html>
"#;

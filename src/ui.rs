use crate::board::render::{escape_html, render_rows};
use crate::models::SlotView;

pub fn render_index(slots: &[SlotView], clubs: &[String]) -> String {
    let rows = render_rows(slots);
    let mut html = String::with_capacity(
        INDEX_HEAD.len() + INDEX_MIDDLE.len() + INDEX_TAIL.len() + rows.len(),
    );

    html.push_str(INDEX_HEAD);
    for club in clubs {
        let club = escape_html(club);
        html.push_str(&format!("<option value=\"{club}\">{club}</option>"));
    }
    html.push_str(INDEX_MIDDLE);
    html.push_str(&rows);
    html.push_str(INDEX_TAIL);
    html
}

const INDEX_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Tennis Court Slots</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&display=swap');

    :root {
      --bg: #f3f6ee;
      --ink: #233127;
      --accent: #3f8f4f;
      --muted: #6b746c;
      --card: rgba(255, 255, 255, 0.92);
      --shadow: 0 24px 60px rgba(35, 49, 39, 0.14);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: linear-gradient(135deg, var(--bg), #e3efd9 70%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(1080px, 100%);
      margin: 0 auto;
      background: var(--card);
      border-radius: 24px;
      box-shadow: var(--shadow);
      padding: 32px;
      display: grid;
      gap: 24px;
    }

    header {
      display: flex;
      flex-wrap: wrap;
      align-items: center;
      justify-content: space-between;
      gap: 12px;
    }

    h1 {
      margin: 0;
      font-size: clamp(1.6rem, 3vw, 2.2rem);
    }

    form.filters {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(150px, 1fr));
      gap: 12px;
      align-items: end;
    }

    label {
      display: grid;
      gap: 4px;
      font-size: 0.85rem;
      color: var(--muted);
    }

    label.check {
      display: flex;
      align-items: center;
      gap: 8px;
    }

    input, select {
      font: inherit;
      padding: 8px 10px;
      border-radius: 10px;
      border: 1px solid rgba(35, 49, 39, 0.2);
    }

    button {
      font: inherit;
      font-weight: 600;
      border: none;
      border-radius: 999px;
      padding: 10px 18px;
      cursor: pointer;
      background: var(--accent);
      color: white;
    }

    button.secondary {
      background: rgba(35, 49, 39, 0.1);
      color: var(--ink);
    }

    button:disabled {
      opacity: 0.6;
      cursor: progress;
    }

    table {
      width: 100%;
      border-collapse: collapse;
    }

    th, td {
      text-align: left;
      padding: 10px 8px;
      border-bottom: 1px solid rgba(35, 49, 39, 0.08);
    }

    .text-center { text-align: center; }
    .text-muted { color: var(--muted); }
    .py-4 { padding-top: 24px; padding-bottom: 24px; }

    .badge {
      display: inline-block;
      min-width: 1em;
      padding: 3px 10px;
      border-radius: 999px;
      font-size: 0.8rem;
    }

    .bg-success { background: #d7f0dc; color: #23663a; }
    .bg-secondary { background: #e4e4e4; color: #555; }
    .bg-light { background: #fafafa; }
    .border { border: 1px solid rgba(35, 49, 39, 0.15); }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Tennis court slots</h1>
      <button id="refresh-slots-btn" type="button">Refresh statuses</button>
    </header>

    <form id="filters-form" class="filters" onsubmit="return false;">
      <label>Date <input type="date" name="date" /></label>
      <label>From <input type="time" name="time_from" /></label>
      <label>To <input type="time" name="time_to" /></label>
      <label>Min. duration
        <select name="min_duration">
          <option value="">Any</option>
          <option value="60">60 min</option>
          <option value="90">90 min</option>
          <option value="120">120 min</option>
        </select>
      </label>
      <label>Club
        <select name="club">
          <option value="">All clubs</option>
"#;

const INDEX_MIDDLE: &str = r#"
        </select>
      </label>
      <label class="check"><input type="checkbox" id="freeOnly" /> Free only</label>
      <button id="apply-filters-btn" type="button">Apply filters</button>
      <button id="reset-filters-btn" type="button" class="secondary">Reset</button>
    </form>

    <table>
      <thead>
        <tr>
          <th>Date</th>
          <th>Time</th>
          <th>Duration</th>
          <th>Club</th>
          <th>Court</th>
          <th>Status</th>
          <th>Source</th>
        </tr>
      </thead>
      <tbody id="slots-table-body">"#;

const INDEX_TAIL: &str = r#"</tbody>
    </table>
  </main>

  <script>
    const fetchSlots = async (filters = {}) => {
      const url = new URL('/api/slots', window.location.origin);
      Object.entries(filters).forEach(([key, value]) => {
        if (value !== undefined && value !== null && value !== '') {
          url.searchParams.append(key, value);
        }
      });
      const res = await fetch(url.toString(), { headers: { Accept: 'application/json' } });
      if (!res.ok) {
        throw new Error('Unable to load slots');
      }
      const data = await res.json();
      return data.slots || [];
    };

    const cell = (content) => {
      const td = document.createElement('td');
      if (content instanceof Node) {
        td.appendChild(content);
      } else {
        td.textContent = content;
      }
      return td;
    };

    const badge = (text, className) => {
      const span = document.createElement('span');
      span.className = `badge ${className}`;
      span.textContent = text;
      return span;
    };

    const renderSlots = (slots) => {
      const tbody = document.getElementById('slots-table-body');
      if (!tbody) {
        console.warn('slots-table-body not found');
        return;
      }
      tbody.replaceChildren();
      if (!slots.length) {
        const td = cell('No slots to display.');
        td.colSpan = 7;
        td.className = 'text-center text-muted py-4';
        const tr = document.createElement('tr');
        tr.appendChild(td);
        tbody.appendChild(tr);
        return;
      }
      slots.forEach((slot) => {
        const tr = document.createElement('tr');
        const free = slot.status === 'free';
        tr.append(
          cell(slot.date),
          cell(slot.time_range),
          cell(`${slot.duration_minutes} min`),
          cell(slot.club),
          cell(slot.court),
          cell(badge(free ? 'Free' : 'Occupied', free ? 'bg-success' : 'bg-secondary')),
          cell(badge(slot.source || '', 'bg-light text-muted border'))
        );
        tbody.appendChild(tr);
      });
    };

    let latestTicket = 0;

    const loadAndRender = async (filters) => {
      const ticket = ++latestTicket;
      const slots = await fetchSlots(filters);
      if (ticket === latestTicket) {
        renderSlots(slots);
      }
    };

    document.addEventListener('DOMContentLoaded', () => {
      const refreshBtn = document.getElementById('refresh-slots-btn');
      const form = document.getElementById('filters-form');
      const applyBtn = document.getElementById('apply-filters-btn');
      const resetBtn = document.getElementById('reset-filters-btn');
      const freeOnly = document.getElementById('freeOnly');

      if (refreshBtn) {
        refreshBtn.addEventListener('click', async () => {
          const label = refreshBtn.textContent;
          refreshBtn.disabled = true;
          refreshBtn.textContent = 'Refreshing...';
          try {
            await loadAndRender();
          } catch (err) {
            console.error(err);
            alert('Could not refresh slots. Please try again later.');
          } finally {
            refreshBtn.disabled = false;
            refreshBtn.textContent = label;
          }
        });
      }

      if (!form) {
        return;
      }

      const collectFilters = () => {
        const filters = {};
        ['date', 'time_from', 'time_to', 'min_duration', 'club'].forEach((name) => {
          const field = form.elements[name];
          if (field) {
            filters[name] = field.value;
          }
        });
        if (freeOnly && freeOnly.checked) {
          filters.free_only = 'true';
        }
        return filters;
      };

      if (applyBtn) {
        applyBtn.addEventListener('click', async () => {
          applyBtn.disabled = true;
          try {
            await loadAndRender(collectFilters());
          } catch (err) {
            console.error(err);
            alert('Could not apply filters. Please try again later.');
          } finally {
            applyBtn.disabled = false;
          }
        });
      }

      if (resetBtn) {
        resetBtn.addEventListener('click', async () => {
          form.reset();
          try {
            await loadAndRender();
          } catch (err) {
            console.error(err);
            alert('Could not reset filters. Please try again later.');
          }
        });
      }
    });
  </script>
</body>
</html>
"#;

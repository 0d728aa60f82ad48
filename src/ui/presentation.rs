use std::path::Path;

use eframe::egui::{self, RichText, ScrollArea, Ui};

// ---------------------------------------------------------------------------
// Static content describing the monitored browser
// ---------------------------------------------------------------------------

enum Block {
    Text(&'static str),
    /// Bold lead-in followed by plain text.
    Lead(&'static str, &'static str),
    Bullet(&'static str),
    /// Screenshot file name inside the assets directory.
    Figure(&'static str),
}

struct Section {
    heading: &'static str,
    blocks: &'static [Block],
}

use Block::*;

const SECTIONS: &[Section] = &[
    Section {
        heading: "Technologies",
        blocks: &[
            Text("The web browser was built with:"),
            Lead("Electron (8.0.0)", "combines the Chromium rendering engine with Node.js so a desktop application can be written with web technologies."),
            Lead("Node.js", "JavaScript runtime used to talk to operating system resources and to run the main process."),
            Lead("JavaScript, HTML and CSS", "behaviour, structure and styling of the browser interface."),
            Lead("Linux", "development and test platform; the terminal was used to run, monitor and debug the project."),
        ],
    },
    Section {
        heading: "Development",
        blocks: &[Text(
            "Each feature was implemented and tested as a separate module and then integrated into one light, functional browser.",
        )],
    },
    Section {
        heading: "Navigation",
        blocks: &[
            Lead("Address bar", "placed both in the top bar and in the centre of the home screen. go() reads the typed text and sends it to the main process through the electronAPI bridge exposed by preload.js; main.js loads the URL in the active tab."),
            Figure("function_go.png"),
            Figure("exposeInMainWorld.png"),
            Lead("Navigation buttons", "back, forward and reload each send an IPC message from the preload bridge to the main process."),
            Figure("botoes.png"),
            Figure("botoes_preload.png"),
            Bullet("back: return to the previous page of the active tab."),
            Bullet("forward: advance to the next page, if any."),
            Bullet("reload: reload the current page without touching the history."),
            Text("main.js registers ipcMain listeners for these events; back and forward first check the tab's navigation history."),
            Figure("ipcmain.png"),
            Figure("barrapesquisa.png"),
        ],
    },
    Section {
        heading: "History",
        blocks: &[
            Text("Every visited page is recorded in the main process with its title, URL and visit time, and listed in historico.html."),
            Figure("historico.png"),
            Text("Clearing the history asks the main process to empty its list, then reloads the page."),
            Figure("clear_historico.png"),
        ],
    },
    Section {
        heading: "Tabs",
        blocks: &[
            Text("Tabs can be opened, closed and switched like in a modern browser. Each tab is an independent view with its own web contents, coordinated by main.js, preload.js and index.html over IPC."),
            Bullet("new-tab: create a view, load the start page and append it to the tab list."),
            Bullet("switch-tab: change the tab shown in the main window."),
            Bullet("close-tab: close one tab and reorganize the rest."),
            Figure("topbar_novaaba.png"),
            Figure("abas_ipcmain.png"),
        ],
    },
    Section {
        heading: "Multiprocessing and tab isolation",
        blocks: &[
            Text("Every tab runs in its own renderer process with contextIsolation enabled and nodeIntegration disabled, so pages cannot reach Node.js APIs and one tab cannot disturb another."),
            Lead("switchTab()", "hides every open tab and shows only the active one."),
            Figure("function_switchtab.png"),
        ],
    },
    Section {
        heading: "CPU/RAM monitoring",
        blocks: &[
            Text("monitoramento.js samples system CPU and memory usage on a fixed interval and prints both percentages on one refreshed terminal line."),
            Figure("linux_monitor.png"),
            Bullet("CPU: `top -bn1` is parsed for the idle percentage; usage is 100 minus idle."),
            Bullet("RAM: `free -m` is parsed for total and used memory; usage is used / total."),
            Figure("cpuraw.png"),
            Figure("calculo_memoria.png"),
            Figure("print_terminal.png"),
            Lead("Limits", "when CPU goes above 90% or RAM above 80%, the browser shows a modal alert letting the user close it or carry on."),
            Figure("alerta.png"),
        ],
    },
];

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Render the informational page. Figures are skipped unless `assets_dir`
/// holds the referenced file.
pub fn presentation_page(ui: &mut Ui, assets_dir: Option<&Path>) {
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for section in SECTIONS {
                ui.add_space(8.0);
                ui.heading(section.heading);
                for block in section.blocks {
                    render_block(ui, block, assets_dir);
                }
            }
        });
}

fn render_block(ui: &mut Ui, block: &Block, assets_dir: Option<&Path>) {
    match block {
        Text(text) => {
            ui.label(*text);
        }
        Lead(lead, text) => {
            ui.horizontal_wrapped(|ui: &mut Ui| {
                ui.label(RichText::new(*lead).strong());
                ui.label(format!("- {text}"));
            });
        }
        Bullet(text) => {
            ui.label(format!("  ● {text}"));
        }
        Figure(name) => {
            let Some(path) = assets_dir.map(|dir| dir.join(name)) else {
                return;
            };
            if !path.is_file() {
                log::debug!("Figure {} not found, skipping", path.display());
                return;
            }
            ui.add(
                egui::Image::new(format!("file://{}", path.display()))
                    .max_width(ui.available_width().min(720.0))
                    .rounding(4.0),
            );
        }
    }
}

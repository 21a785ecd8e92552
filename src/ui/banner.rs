/// ASCII art shown above the grid and when every creature is caught.

pub const TITLE: &[&str] = &[
    r"                                  ,'\",
    r"    _.----.        ____         ,'  _\   ___    ___     ____",
    r"_,-'       `.     |    |  /`.   \,-'    |   \  /   |   |    \  |`.",
    r"\      __    \    '-.  | /   `.  ___    |    \/    |   '-.   \ |  |",
    r" \.    \ \   |  __  |  |/    ,','_  `.  |          | __  |    \|  |",
    r"   \    \/   /,' _`.|      ,' / / / /   |          ,' _`.|     |  |",
    r"    \     ,-'/  / \ \    ,'   | \/ / ,`.|         /  / \ \  |     |",
    r"     \    \ |   \_/  |   `-.  \    `'  /|  |    ||   \_/  | |\    |",
    r"      \    \ \      /       `-.`.___,-' |  |\  /| \      /  | |   |",
    r"       \    \ `.__,'|  |`-._    `|      |__| \/ |  `.__,'|  | |   |",
    r"        \_.-'       |__|    `-._ |              '-.|     '-.| |   |",
    r"                                `'                            '-._|",
];

pub const CONGRATS: &[&str] = &[
    "░█████╗░░█████╗░███╗░░██╗░██████╗░██████╗░░█████╗░████████╗░██████╗",
    "██╔══██╗██╔══██╗████╗░██║██╔════╝░██╔══██╗██╔══██╗╚══██╔══╝██╔════╝",
    "██║░░╚═╝██║░░██║██╔██╗██║██║░░██╗░██████╔╝███████║░░░██║░░░╚█████╗░",
    "██║░░██╗██║░░██║██║╚████║██║░░╚██╗██╔══██╗██╔══██║░░░██║░░░░╚═══██╗",
    "╚█████╔╝╚█████╔╝██║░╚███║╚██████╔╝██║░░██║██║░░██║░░░██║░░░██████╔╝",
    "░╚════╝░░╚════╝░╚═╝░░╚══╝░╚═════╝░╚═╝░░╚═╝╚═╝░░╚═╝░░░╚═╝░░░╚═════╝░",
];

/// Print the title in cooked mode, before the terminal is taken over.
pub fn print_title() {
    for line in TITLE {
        println!("{line}");
    }
}

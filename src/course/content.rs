//! The CCNA IPv4 course: section list and quiz answer keys
//!
//! Any change to course content is a change to this file only.

use super::catalog::{Catalog, Module};
use super::quiz::AnswerKey;

pub const MODULE_1: &str = "MODULE_1";
pub const MODULE_2: &str = "MODULE_2";
pub const MODULE_3: &str = "MODULE_3";
pub const FINAL: &str = "FINAL";
pub const CERTIFICATE: &str = "CERTIFICATE";

/// Section name of the final quiz, whose passing score is reported separately
pub const FINAL_QUIZ: &str = "Final Quiz";

/// Section name of the closing certificate
pub const CERTIFICATE_SECTION: &str = "Certificate";

/// Programme name printed on the certificate
pub const COURSE_TITLE: &str = "IPv4 Addressing Mastery Program";

/// Build the full course catalog
pub fn ccna_catalog() -> Catalog {
    Catalog::new(vec![
        Module::new(MODULE_1)
            .lesson("Section 1: What is IPv4?")
            .lesson("Section 2: Network Bits & Host Bits")
            .lesson("Section 3: IP Address Classes (A, B, C, D, E)")
            .lesson("Section 4: Public vs Private IPs")
            .lesson("Section 5: Quick Trick - Finding Network & Host Bits")
            .lesson("Section 6: What is IPv6?")
            .lesson("Section 7: Why You Should Care?")
            .lesson("Section 8: Summary Recap")
            .quiz("Module 1 Quiz"),
        Module::new(MODULE_2)
            .lesson("Section 1: What is a MAC Address?")
            .lesson("Section 2: Where is the MAC Used?")
            .lesson("Section 3: MAC vs IP - What's the Difference?")
            .lesson("Section 4: How does a switch use MAC?")
            .lesson("Section 5: Format of a MAC Address?")
            .lesson("Section 6: Can a MAC Address be Changed?")
            .lesson("Section 7: Why You Should Know This")
            .lesson("Section 8: Recap Time")
            .quiz("Module 2 Quiz"),
        Module::new(MODULE_3)
            .lesson("Section 1: What is a Cisco Switch?")
            .lesson("Section 2: Why do we use a Switch?")
            .lesson("Section 3: Switch Ports - What Are They?")
            .lesson("Section 4: Layer 2 vs Layer 3 Switches")
            .lesson("Section 5: Duplex Settings")
            .lesson("Section 6: Speed Options")
            .lesson("Section 7: Show Commands (Just for Fun)")
            .lesson("Section 8: Recap Time Switch")
            .quiz("Module 3 Quiz")
            .lesson("Section 9: Switch MAC Address Table")
            .lesson("Section 10: Broadcast, Unicast, Multicast")
            .lesson("Section 11: PoE - Power over Ethernet")
            .lesson("Section 12: VLAN (Intro Only)")
            .lesson("Section 13: Port Security (Sneak Peek)")
            .lesson("Section 14: Trunk Ports (Mini Intro)")
            .lesson("Section 15: Real-Life Application")
            .lesson("Section 16: Final Recap")
            .quiz("Module 3/2 Quiz"),
        Module::new(FINAL).quiz(FINAL_QUIZ),
        Module::new(CERTIFICATE).certificate(CERTIFICATE_SECTION),
    ])
    .with_quiz(module_1_quiz())
    .with_quiz(module_2_quiz())
    .with_quiz(module_3_quiz())
    .with_quiz(module_3_part_2_quiz())
    .with_quiz(final_quiz())
}

fn module_1_quiz() -> AnswerKey {
    AnswerKey::new("Module 1 Quiz")
        .question(
            "Module 1 Q1",
            "Which part of an IP address identifies the device in the network?",
            &["Network part", "Host part", "Subnet mask", "Gateway"],
            'B',
            "The host part identifies the specific device within the network.",
        )
        .question(
            "Module 1 Q2",
            "What class does the IP 10.0.0.1 belong to?",
            &["Class B", "Class C", "Class A", "Class D"],
            'C',
            "The IP 10.0.0.1 belongs to Class A.",
        )
        .question(
            "Module 1 Q3",
            "Which of the following is a private IP address?",
            &["192.168.1.100", "8.8.8.8", "172.33.0.1", "224.0.0.1"],
            'A',
            "192.168.1.100 is a private IP address.",
        )
        .question(
            "Module 1 Q4",
            "How many bits does an IPv4 address have?",
            &["64", "128", "32", "256"],
            'C',
            "An IPv4 address has 32 bits.",
        )
        .question(
            "Module 1 Q5",
            "What does a subnet mask of 255.255.255.0 mean?",
            &[
                "All 32 bits are host bits",
                "First 24 bits are host bits",
                "First 24 bits are network bits",
                "All bits are reserved",
            ],
            'C',
            "The first 24 bits are network bits.",
        )
}

fn module_2_quiz() -> AnswerKey {
    AnswerKey::new("Module 2 Quiz")
        .question(
            "Module 2 Q1",
            "What layer of the OSI model does the MAC address belong to?",
            &["Layer 1", "Layer 2", "Layer 3", "Layer 4"],
            'B',
            "The MAC address operates at Layer 2 (Data Link Layer) of the OSI model.",
        )
        .question(
            "Module 2 Q2",
            "Which of the following is a valid MAC address?",
            &["192.168.1.1", "255.255.255.0", "00:1A:2B:3C:4D:5E", "10.0.0.1"],
            'C',
            "00:1A:2B:3C:4D:5E is a valid MAC address.",
        )
        .question(
            "Module 2 Q3",
            "What protocol is used to map an IP address to a MAC address?",
            &["DNS", "FTP", "ARP", "DHCP"],
            'C',
            "ARP (Address Resolution Protocol) maps IP addresses to MAC addresses.",
        )
        .question(
            "Module 2 Q4",
            "Which device uses MAC addresses to forward data in a LAN?",
            &["Router", "Switch", "Firewall", "Modem"],
            'B',
            "Switches use MAC addresses to forward data in a LAN.",
        )
        .question(
            "Module 2 Q5",
            "Which part of the MAC address identifies the manufacturer?",
            &["Last 6 digits", "First 3 digits", "Middle pair", "The IP address part"],
            'B',
            "The first 3 bytes of the MAC address identify the manufacturer.",
        )
}

fn module_3_quiz() -> AnswerKey {
    AnswerKey::new("Module 3 Quiz")
        .question(
            "Module 3 Q1",
            "What does a switch use to forward data in a network?",
            &["IP address", "MAC address", "Port number", "Subnet mask"],
            'B',
            "Switches use MAC addresses to forward data within a LAN.",
        )
        .question(
            "Module 3 Q2",
            "Which duplex setting allows data to be sent and received at the same time?",
            &["Half duplex", "Full duplex", "Dual mode", "Walkie mode"],
            'B',
            "Full duplex allows data to be sent and received simultaneously.",
        )
        .question(
            "Module 3 Q3",
            "What command shows port speed and duplex on a Cisco switch?",
            &["show users", "show speed", "show interfaces", "show ip"],
            'C',
            "The 'show interfaces' command displays port speed and duplex settings.",
        )
        .question(
            "Module 3 Q4",
            "What's the max speed of a Gigabit Ethernet port?",
            &["100 Mbps", "10 Mbps", "1 Gbps", "10 Gbps"],
            'C',
            "The maximum speed of a Gigabit Ethernet port is 1 Gbps.",
        )
        .question(
            "Module 3 Q5",
            "A Layer 3 switch can perform:",
            &["Switching only", "Routing only", "Switching & Routing", "Neither"],
            'C',
            "A Layer 3 switch can perform both switching and routing.",
        )
}

fn module_3_part_2_quiz() -> AnswerKey {
    AnswerKey::new("Module 3/2 Quiz")
        .question(
            "Module 3 Q6",
            "Which command shows all learned MAC addresses in a switch?",
            &["show vlan", "show mac address-table", "show users", "show switchport"],
            'B',
            "'show mac address-table' displays all MAC addresses the switch has learned.",
        )
        .question(
            "Module 3 Q7",
            "What is PoE used for?",
            &[
                "Enhancing IP range",
                "Sending power over Ethernet",
                "Speed boosting",
                "Internet load balancing",
            ],
            'B',
            "PoE lets a switch provide electrical power over the same cable used for data.",
        )
        .question(
            "Module 3 Q8",
            "What port allows multiple VLANs to pass?",
            &["Access port", "Trunk port", "Fast port", "Layer 2 port"],
            'B',
            "Trunk ports carry traffic from multiple VLANs over a single link.",
        )
        .question(
            "Module 3 Q9",
            "What is the purpose of Port Security?",
            &[
                "Increase internet speed",
                "Stop ARP requests",
                "Restrict device access",
                "Allow trunking",
            ],
            'C',
            "Port Security restricts the devices that can connect to a switch port.",
        )
        .question(
            "Module 3 Q10",
            "Which of these is a frame type handled by switches?",
            &["TCP", "Unicast", "ICMP", "Ping"],
            'B',
            "Switches forward unicast, broadcast and multicast frames.",
        )
}

fn final_quiz() -> AnswerKey {
    AnswerKey::new(FINAL_QUIZ)
        .question(
            "Final Quiz Q1",
            "How many bits are in an IPv4 address?",
            &["16 bits", "32 bits", "64 bits"],
            'B',
            "An IPv4 address is 32 bits long, divided into 4 octets.",
        )
        .question(
            "Final Quiz Q2",
            "What command shows the MAC address table on a Cisco switch?",
            &["show vlan", "show mac address-table", "show ip route", "show interfaces"],
            'B',
            "The 'show mac address-table' command displays the MAC address table.",
        )
        .question(
            "Final Quiz Q3",
            "What does PoE stand for?",
            &[
                "Power over Ethernet",
                "Port over Ethernet",
                "Power of Ethernet",
                "Plug over Ethernet",
            ],
            'A',
            "PoE stands for Power over Ethernet.",
        )
        .question(
            "Final Quiz Q4",
            "What is the maximum speed of a Gigabit Ethernet port?",
            &["100 Mbps", "1 Gbps", "10 Gbps", "100 Gbps"],
            'B',
            "The maximum speed of a Gigabit Ethernet port is 1 Gbps.",
        )
        .question(
            "Final Quiz Q5",
            "What does a switch use to forward data in a network?",
            &["IP address", "MAC address", "Port number", "Subnet mask"],
            'B',
            "Switches use MAC addresses to forward data within a LAN.",
        )
        .question(
            "Final Quiz Q6",
            "What is the purpose of Port Security?",
            &[
                "Increase internet speed",
                "Stop ARP requests",
                "Restrict device access",
                "Allow trunking",
            ],
            'C',
            "Port Security restricts device access to a switch port.",
        )
        .question(
            "Final Quiz Q7",
            "Which layer of the OSI model does the MAC address belong to?",
            &["Layer 1", "Layer 2", "Layer 3", "Layer 4"],
            'B',
            "The MAC address operates at Layer 2 (Data Link Layer) of the OSI model.",
        )
        .question(
            "Final Quiz Q8",
            "Which device uses MAC addresses to forward data in a LAN?",
            &["Router", "Switch", "Firewall", "Modem"],
            'B',
            "Switches use MAC addresses to forward data in a LAN.",
        )
        .question(
            "Final Quiz Q9",
            "Which of the following is a valid MAC address?",
            &["192.168.1.1", "255.255.255.0", "00:1A:2B:3C:4D:5E", "10.0.0.1"],
            'C',
            "00:1A:2B:3C:4D:5E is a valid MAC address.",
        )
        .question(
            "Final Quiz Q10",
            "Which command shows the port speed and duplex settings on a Cisco switch?",
            &["show interfaces", "show port-speed", "show mac address-table", "show ip config"],
            'A',
            "The 'show interfaces' command displays port speed and duplex settings.",
        )
}

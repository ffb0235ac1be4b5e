pub mod config;

pub mod modules {
    pub mod time_entries {
        pub mod core {
            pub mod entry;
            pub mod ports;
        }
        pub mod adapters {
            pub mod in_memory_store;
            pub mod in_memory_tasks;
        }
        pub mod use_cases {
            pub mod delete_entry;
            pub mod errors;
            pub mod list_entries;
            pub mod start_timer;
            pub mod stop_timer;
            pub mod update_entry;
        }
        pub mod inbound {
            pub mod http;
        }
        pub mod projection;
    }
    pub mod stats {
        pub mod aggregate;
        pub mod response;
        pub mod use_cases;
        pub mod inbound {
            pub mod http;
        }
    }
}

pub mod shared {
    pub mod infrastructure {
        pub mod realtime {
            pub mod hub;
            pub mod ws;
        }
    }
}

pub mod shell {
    pub mod http;
    pub mod state;
    pub mod workers;
}

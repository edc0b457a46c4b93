#![allow(dead_code)]

use serde_json::{Value, json};

/// Two clouds, each with a vCloud holding organisations and their VDCs.
pub fn org_vdc_list() -> Value {
    json!({
        "id": "1000",
        "meta": { "owner": "ops", "version": 3 },
        "clouds": [
            {
                "id": "cld-1000-1",
                "vcloud": {
                    "id": "vcd-1000-1",
                    "name": "vcd-1000-1",
                    "orgs": [
                        {
                            "orgName": "OrgName-1000-A",
                            "orgVdcs": [
                                { "id": "orgVdc-1000-1-01", "name": "vdc-a1", "status": "Active" },
                                { "id": "orgVdc-1000-1-02", "name": "vdc-a2", "status": "Retired" }
                            ]
                        },
                        {
                            "orgName": "OrgName-1000-B",
                            "orgVdcs": [
                                { "id": "orgVdc-1000-1-03", "name": "vdc-b1", "status": "Active" }
                            ]
                        }
                    ]
                }
            },
            {
                "id": "cld-1000-2",
                "vcloud": {
                    "id": "vcd-1000-2",
                    "name": "vcd-1000-2",
                    "orgs": [
                        {
                            "orgName": "OrgName-1000-X",
                            "orgVdcs": [
                                { "id": "orgVdc-1000-2-01", "name": "vdc-x1", "status": "Active" },
                                { "id": "orgVdc-1000-2-03", "name": "vdc-x3", "status": "Retired" }
                            ]
                        },
                        {
                            "orgName": "OrgName-1000-B",
                            "orgVdcs": []
                        }
                    ]
                }
            }
        ]
    })
}

/// A top-level array of NAT rules, as returned by an edge gateway.
pub fn nat_rules() -> Value {
    json!([
        { "ruleId": 1, "action": "snat", "originalAddress": "192.0.33.33-192.0.33.133", "description": "" },
        { "ruleId": 2, "action": "dnat", "originalAddress": "192.168.0.133-192.168.0.135", "description": "EZZZt" },
        {
            "ruleId": 3,
            "action": "dnat",
            "originalAddress": "192.168.23.1",
            "description": "Nated to .13",
            "translated": { "originalAddress": "nested-only" }
        }
    ])
}

/// An object with a flat array of strings.
pub fn letters() -> Value {
    json!({ "arr": ["x", "y", "z"] })
}
